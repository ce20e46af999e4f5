//! JWT cookie sessions: token issuance, the `SessionUser` extractor and
//! its rejection responses.
//!
//! The session token lives in an HttpOnly cookie named `token`. Any
//! rejection clears the cookie so a stale or tampered token does not keep
//! bouncing the client.

use axum::{
  extract::FromRequestParts,
  http::{header::SET_COOKIE, request::Parts, HeaderValue, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{
  decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header,
  Validation,
};
use presea_core::{applicant::Applicant, store::ApplicantStore};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Signing and verification keys plus the token lifetime.
pub struct SessionKeys {
  encoding:  EncodingKey,
  decoding:  DecodingKey,
  ttl_hours: i64,
}

#[derive(Serialize, Deserialize)]
struct Claims {
  sub: i64,
  exp: i64,
}

impl SessionKeys {
  pub fn new(secret: &str, ttl_hours: i64) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
      ttl_hours,
    }
  }

  /// Sign a token for `applicant_id`.
  pub fn issue(&self, applicant_id: i64) -> Result<String, crate::ApiError> {
    let exp = (Utc::now() + Duration::hours(self.ttl_hours)).timestamp();
    encode(
      &Header::default(),
      &Claims { sub: applicant_id, exp },
      &self.encoding,
    )
    .map_err(|e| crate::ApiError::Internal(Box::new(e)))
  }

  fn verify(&self, token: &str) -> Result<i64, SessionRejection> {
    decode::<Claims>(token, &self.decoding, &Validation::default())
      .map(|data| data.claims.sub)
      .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => SessionRejection::Expired,
        _ => SessionRejection::Invalid,
      })
  }
}

/// Build the session cookie carrying `token`.
pub fn session_cookie(token: String) -> Cookie<'static> {
  let mut cookie = Cookie::new(SESSION_COOKIE, token);
  cookie.set_http_only(true);
  cookie.set_same_site(SameSite::Lax);
  cookie.set_path("/");
  cookie
}

/// An expired cookie that tells the browser to drop the session.
pub fn removal_cookie() -> Cookie<'static> {
  let mut cookie = Cookie::new(SESSION_COOKIE, "");
  cookie.set_path("/");
  cookie.make_removal();
  cookie
}

/// The authenticated applicant behind the current request.
///
/// Extracting this in a handler enforces a live session; handlers then
/// compare `applicant.id` against path parameters for ownership.
pub struct SessionUser {
  pub applicant: Applicant,
}

/// Why a session was refused. All variants except `Internal` answer 401
/// and clear the cookie.
#[derive(Debug)]
pub enum SessionRejection {
  Missing,
  Expired,
  Invalid,
  SubjectNotFound,
  Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for SessionRejection {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      SessionRejection::Missing => {
        (StatusCode::UNAUTHORIZED, "No autorizado, no hay token.")
      }
      SessionRejection::Expired => {
        (StatusCode::UNAUTHORIZED, "No autorizado, token expirado.")
      }
      SessionRejection::Invalid => {
        (StatusCode::UNAUTHORIZED, "No autorizado, token inválido.")
      }
      SessionRejection::SubjectNotFound => (
        StatusCode::UNAUTHORIZED,
        "No autorizado, el usuario de la sesión no existe.",
      ),
      SessionRejection::Internal(e) => {
        tracing::error!(error = %e, "session lookup failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "error interno del servidor")
      }
    };

    let mut response =
      (status, Json(json!({ "message": message }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      if let Ok(value) = HeaderValue::from_str(&removal_cookie().to_string()) {
        response.headers_mut().append(SET_COOKIE, value);
      }
    }
    response
  }
}

impl<S> FromRequestParts<AppState<S>> for SessionUser
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  type Rejection = SessionRejection;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar
      .get(SESSION_COOKIE)
      .map(|c| c.value().to_owned())
      .ok_or(SessionRejection::Missing)?;

    let applicant_id = state.sessions.verify(&token)?;

    let applicant = state
      .store
      .applicant(applicant_id)
      .await
      .map_err(|e| SessionRejection::Internal(Box::new(e)))?
      .ok_or(SessionRejection::SubjectNotFound)?;

    Ok(SessionUser { applicant })
  }
}
