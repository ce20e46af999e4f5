//! Error types for `presea-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("aspirante {0} no encontrado")]
  ApplicantNotFound(i64),

  #[error("{kind} {id} no encontrado para este aspirante")]
  RecordNotFound { kind: &'static str, id: i64 },

  #[error("la institución '{0}' ya existe")]
  InstitutionExists(String),

  #[error("el CURP o correo electrónico ya están registrados")]
  IdentityTaken,

  #[error("campo obligatorio ausente: {0}")]
  MissingField(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
