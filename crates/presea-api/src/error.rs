//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Maps the portal's error taxonomy onto HTTP: validation 400, bad
/// credentials 401, forbidden 403, not-found 404, conflict 409,
/// everything transient or unknown 500.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("no tienes permiso para acceder a este recurso")]
  Forbidden,

  #[error("{0}")]
  Unauthorized(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Conflict(String),

  #[error("error interno del servidor")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<presea_core::Error> for ApiError {
  fn from(e: presea_core::Error) -> Self {
    use presea_core::Error as E;
    match e {
      E::ApplicantNotFound(_) | E::RecordNotFound { .. } => {
        ApiError::NotFound(e.to_string())
      }
      E::InstitutionExists(_) | E::IdentityTaken => ApiError::Conflict(e.to_string()),
      E::MissingField(_) => ApiError::BadRequest(e.to_string()),
      E::Store(inner) => ApiError::Internal(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
      }
    };
    (status, Json(json!({ "message": message }))).into_response()
  }
}
