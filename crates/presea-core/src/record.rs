//! Repeatable child records: achievements, extracurricular activities,
//! research, work experience — all the same (title, description, evidence)
//! shape — plus skills, which carry a percentage instead of a file.

use serde::{Deserialize, Serialize};

use crate::completeness;

/// Which child-record table a request targets. Storage backends map this
/// to a static table descriptor; no SQL is ever derived from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
  Achievement,
  Activity,
  Research,
  Experience,
}

impl ChildKind {
  /// Label used in error messages and logs.
  pub fn label(self) -> &'static str {
    match self {
      ChildKind::Achievement => "logro",
      ChildKind::Activity => "actividad",
      ChildKind::Research => "investigación",
      ChildKind::Experience => "experiencia laboral",
    }
  }
}

/// A stored child record, completeness annotated at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildRecord {
  pub id:           i64,
  #[serde(rename = "titulo")]
  pub title:        String,
  #[serde(rename = "descripcion")]
  pub description:  String,
  #[serde(rename = "url")]
  pub evidence_url: String,
  #[serde(rename = "isComplete")]
  pub complete:     bool,
}

impl ChildRecord {
  pub fn new(id: i64, title: String, description: String, evidence_url: String) -> Self {
    let complete =
      completeness::child_complete(&title, &description, &evidence_url);
    Self { id, title, description, evidence_url, complete }
  }
}

/// Input for creating a child record. The evidence file is uploaded before
/// the insert; validation of the three required parts happens upstream.
#[derive(Debug, Clone)]
pub struct NewChildRecord {
  pub title:        String,
  pub description:  String,
  pub evidence_url: String,
}

// ─── Skills ──────────────────────────────────────────────────────────────────

/// One row of `habilidades`. No evidence file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
  pub id:          i64,
  #[serde(rename = "titulo")]
  pub title:       String,
  #[serde(rename = "descripcion")]
  pub description: Option<String>,
  #[serde(rename = "porcentaje")]
  pub percentage:  i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSkill {
  #[serde(rename = "titulo")]
  pub title:       String,
  #[serde(rename = "descripcion")]
  pub description: Option<String>,
  #[serde(rename = "porcentaje")]
  pub percentage:  i64,
}
