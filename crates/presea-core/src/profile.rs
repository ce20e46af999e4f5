//! The applicant profile — the 1:1 child record created lazily on first
//! save — and its associated social link.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{applicant::Applicant, completeness};

// ─── Stored rows ─────────────────────────────────────────────────────────────

/// One row of `perfil_aspirante`. At most one per applicant.
#[derive(Debug, Clone, Default)]
pub struct Profile {
  pub id:                     i64,
  pub applicant_id:           i64,
  pub phone:                  Option<String>,
  pub birth_date:             Option<NaiveDate>,
  pub personal_email:         Option<String>,
  pub sex:                    Option<String>,
  pub nationality:            Option<String>,
  pub bio:                    Option<String>,
  pub video_url:              Option<String>,
  pub institutional_evidence: Option<String>,
  pub identity_evidence:      Option<String>,
  pub application_letter:     Option<String>,
  pub social_link_id:         Option<i64>,
}

/// One row of `redes_sociales`, scoped to a single applicant and
/// deduplicated by URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
  #[serde(rename = "id_red_social")]
  pub id:           i64,
  #[serde(rename = "id_aspirante")]
  pub applicant_id: i64,
  #[serde(rename = "nombre_red_social")]
  pub name:         String,
  #[serde(rename = "link_red_social")]
  pub url:          String,
}

// ─── Social-name inference ───────────────────────────────────────────────────

/// Ordered (host substring, display label) rules. First match wins.
const SOCIAL_PROVIDERS: &[(&str, &str)] = &[
  ("facebook.com", "Facebook"),
  ("linkedin.com", "LinkedIn"),
  ("twitter.com", "Twitter/X"),
  ("x.com", "Twitter/X"),
  ("instagram.com", "Instagram"),
  ("github.com", "GitHub"),
];

/// Default label for URLs that match no known provider.
pub const GENERIC_SOCIAL_NAME: &str = "Enlace Personal";

/// Infer the display name of a social link from its URL.
pub fn infer_social_name(url: &str) -> &'static str {
  SOCIAL_PROVIDERS
    .iter()
    .find(|(host, _)| url.contains(host))
    .map(|(_, label)| *label)
    .unwrap_or(GENERIC_SOCIAL_NAME)
}

// ─── Save input ──────────────────────────────────────────────────────────────

/// Merged input for one profile save.
///
/// Text fields carry the full form state: `None` clears the stored column.
/// The `*_url` fields are public URLs of files uploaded during *this*
/// request; `None` keeps the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
  pub phone:          Option<String>,
  pub birth_date:     Option<NaiveDate>,
  pub personal_email: Option<String>,
  pub sex:            Option<String>,
  pub nationality:    Option<String>,
  pub bio:            Option<String>,
  pub social_url:     Option<String>,
  pub video_url:      Option<String>,

  pub photo_url:                  Option<String>,
  pub institutional_evidence_url: Option<String>,
  pub identity_evidence_url:      Option<String>,
  pub application_letter_url:     Option<String>,
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// The merged, completeness-annotated profile returned by reads and saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
  #[serde(rename = "id")]
  pub id:               i64,
  #[serde(rename = "nombre")]
  pub first_name:       String,
  #[serde(rename = "ap_paterno")]
  pub paternal_surname: String,
  #[serde(rename = "ap_materno")]
  pub maternal_surname: Option<String>,
  pub curp:             String,
  #[serde(rename = "correo")]
  pub email:            String,
  #[serde(rename = "foto_perfil")]
  pub photo_url:        Option<String>,

  #[serde(rename = "telefono")]
  pub phone:          Option<String>,
  #[serde(rename = "fechaNacimiento")]
  pub birth_date:     Option<NaiveDate>,
  #[serde(rename = "correoOpcional")]
  pub personal_email: Option<String>,
  #[serde(rename = "sexo")]
  pub sex:            Option<String>,
  #[serde(rename = "nacionalidad")]
  pub nationality:    Option<String>,
  #[serde(rename = "resenaCurricular")]
  pub bio:            Option<String>,
  #[serde(rename = "redSocial")]
  pub social_url:     Option<String>,
  #[serde(rename = "videoUrl")]
  pub video_url:      Option<String>,

  #[serde(rename = "evidenciaInstitucional")]
  pub institutional_evidence: Option<String>,
  #[serde(rename = "evidenciaIdentidad")]
  pub identity_evidence:      Option<String>,
  #[serde(rename = "cartaPostulacion")]
  pub application_letter:     Option<String>,

  #[serde(rename = "isProfileComplete")]
  pub complete: bool,
}

impl ProfileView {
  /// Assemble the read model from current rows, recomputing completeness.
  /// The profile may not exist yet; the applicant always does.
  pub fn assemble(
    applicant: Applicant,
    profile:   Option<Profile>,
    social:    Option<SocialLink>,
  ) -> Self {
    let complete = completeness::profile_complete(
      profile.as_ref(),
      applicant.photo_url.as_deref(),
      social.as_ref(),
    );
    let p = profile.unwrap_or_default();

    Self {
      id:               applicant.id,
      first_name:       applicant.first_name,
      paternal_surname: applicant.paternal_surname,
      maternal_surname: applicant.maternal_surname,
      curp:             applicant.curp,
      email:            applicant.email,
      photo_url:        applicant.photo_url,

      phone:          p.phone,
      birth_date:     p.birth_date,
      personal_email: p.personal_email,
      sex:            p.sex,
      nationality:    p.nationality,
      bio:            p.bio,
      social_url:     social.map(|s| s.url),
      video_url:      p.video_url,

      institutional_evidence: p.institutional_evidence,
      identity_evidence:      p.identity_evidence,
      application_letter:     p.application_letter,

      complete,
    }
  }
}

/// Outcome of a profile save: the committed view plus the storage URLs the
/// save superseded (to be deleted after commit, best-effort).
#[derive(Debug)]
pub struct ProfileSaved {
  pub view:       ProfileView,
  pub superseded: Vec<String>,
  pub created:    bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn infers_known_providers() {
    assert_eq!(infer_social_name("https://linkedin.com/in/x"), "LinkedIn");
    assert_eq!(infer_social_name("https://github.com/abc"), "GitHub");
    assert_eq!(infer_social_name("https://x.com/abc"), "Twitter/X");
    assert_eq!(infer_social_name("https://www.facebook.com/p"), "Facebook");
  }

  #[test]
  fn unknown_url_gets_generic_label() {
    assert_eq!(infer_social_name("https://example.org/me"), GENERIC_SOCIAL_NAME);
  }
}
