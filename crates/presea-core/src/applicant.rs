//! Applicant — the registrant identity record.
//!
//! Wire names stay in the portal's original Spanish vocabulary; everything
//! else in this crate is English.

use serde::{Deserialize, Serialize};

/// One row of `aspirante`. Never deleted by the core workflows; the photo
/// URL is the only field mutated after registration (by a profile save).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
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
}

/// Registration input. The password arrives already hashed (argon2 PHC
/// string); the core never sees plaintext credentials.
#[derive(Debug, Clone)]
pub struct NewApplicant {
  pub first_name:       String,
  pub paternal_surname: String,
  pub maternal_surname: Option<String>,
  pub curp:             String,
  pub email:            String,
  pub password_hash:    String,
  pub region_id:        i64,
  pub category_id:      i64,
  pub institution_id:   Option<i64>,
  pub photo_url:        Option<String>,
}
