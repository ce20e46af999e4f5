//! Schooling — the second 1:1 lazy child record — and the shared
//! institution catalog it references.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::completeness;

// ─── Institutions ────────────────────────────────────────────────────────────

/// Public/private type of an institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionKind {
  Publica,
  Privada,
}

impl InstitutionKind {
  pub fn as_str(self) -> &'static str {
    match self {
      InstitutionKind::Publica => "publica",
      InstitutionKind::Privada => "privada",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "publica" => Some(InstitutionKind::Publica),
      "privada" => Some(InstitutionKind::Privada),
      _ => None,
    }
  }
}

/// One row of `institucion`. Name uniqueness is enforced by the store; a
/// duplicate insert surfaces as [`crate::Error::InstitutionExists`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
  #[serde(rename = "id_institucion")]
  pub id:       i64,
  #[serde(rename = "nombre_institucion")]
  pub name:     String,
  #[serde(rename = "id_estado")]
  pub state_id: i64,
  #[serde(rename = "tipo_institucion")]
  pub kind:     InstitutionKind,
}

/// Inline request to create an institution during a schooling save.
/// State and kind are the disambiguating attributes; both are required
/// once a name is supplied.
#[derive(Debug, Clone)]
pub struct NewInstitution {
  pub name:     String,
  pub state_id: Option<i64>,
  pub kind:     Option<InstitutionKind>,
}

// ─── Stored row ──────────────────────────────────────────────────────────────

/// One row of `escolaridad`. At most one per applicant.
#[derive(Debug, Clone, Default)]
pub struct Schooling {
  pub id:             i64,
  pub applicant_id:   i64,
  pub institution_id: Option<i64>,
  pub level:          Option<String>,
  pub degree_title:   Option<String>,
  pub degree_status:  Option<String>,
  pub license_number: Option<String>,
  pub issue_date:     Option<NaiveDate>,
  pub study_proof:    Option<String>,
  pub degree_file:    Option<String>,
  pub license_file:   Option<String>,
}

// ─── Save input ──────────────────────────────────────────────────────────────

/// Merged input for one schooling save. Same conventions as
/// [`crate::profile::ProfileDraft`]: text fields carry full form state,
/// `*_url` fields are this request's fresh uploads.
///
/// When `new_institution` is present it wins over `institution_id`.
#[derive(Debug, Clone, Default)]
pub struct SchoolingDraft {
  pub institution_id:  Option<i64>,
  pub new_institution: Option<NewInstitution>,
  pub level:           Option<String>,
  pub degree_title:    Option<String>,
  pub degree_status:   Option<String>,
  pub license_number:  Option<String>,
  pub issue_date:      Option<NaiveDate>,

  pub study_proof_url:  Option<String>,
  pub degree_file_url:  Option<String>,
  pub license_file_url: Option<String>,
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// Schooling joined with its institution name, completeness recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolingView {
  #[serde(rename = "id_escolaridad")]
  pub id:               i64,
  #[serde(rename = "id_aspirante")]
  pub applicant_id:     i64,
  #[serde(rename = "id_institucion")]
  pub institution_id:   Option<i64>,
  #[serde(rename = "institucion")]
  pub institution_name: Option<String>,
  #[serde(rename = "nivel")]
  pub level:            Option<String>,
  #[serde(rename = "titulo_obtenido")]
  pub degree_title:     Option<String>,
  #[serde(rename = "estado")]
  pub degree_status:    Option<String>,
  #[serde(rename = "cedula_profesional")]
  pub license_number:   Option<String>,
  #[serde(rename = "fecha")]
  pub issue_date:       Option<NaiveDate>,
  #[serde(rename = "constanciaUrl")]
  pub study_proof:      Option<String>,
  #[serde(rename = "tituloUrl")]
  pub degree_file:      Option<String>,
  #[serde(rename = "cedulaUrl")]
  pub license_file:     Option<String>,
  #[serde(rename = "isComplete")]
  pub complete:         bool,
}

impl SchoolingView {
  pub fn assemble(schooling: Schooling, institution_name: Option<String>) -> Self {
    let complete = completeness::schooling_complete(&schooling);
    Self {
      id:               schooling.id,
      applicant_id:     schooling.applicant_id,
      institution_id:   schooling.institution_id,
      institution_name,
      level:            schooling.level,
      degree_title:     schooling.degree_title,
      degree_status:    schooling.degree_status,
      license_number:   schooling.license_number,
      issue_date:       schooling.issue_date,
      study_proof:      schooling.study_proof,
      degree_file:      schooling.degree_file,
      license_file:     schooling.license_file,
      complete,
    }
  }
}

/// Outcome of a schooling save.
#[derive(Debug)]
pub struct SchoolingSaved {
  pub view:       SchoolingView,
  pub superseded: Vec<String>,
  pub created:    bool,
}
