//! Session lifecycle: registration, login, logout, identity check.

use argon2::{
  password_hash::SaltString, Argon2, PasswordHash, PasswordHasher,
  PasswordVerifier,
};
use axum::{
  extract::{Multipart, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use axum_extra::extract::CookieJar;
use presea_core::{applicant::NewApplicant, store::ApplicantStore};
use rand_core::OsRng;
use serde::Deserialize;
use serde_json::json;

use crate::{
  session::{removal_cookie, session_cookie, SessionUser},
  workflow::{self, Uploads},
  ApiError, AppState,
};

fn internal(e: impl std::error::Error + Send + Sync + 'static) -> ApiError {
  ApiError::Internal(Box::new(e))
}

// ─── Registration ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct RegistrationForm {
  first_name:       Option<String>,
  paternal_surname: Option<String>,
  maternal_surname: Option<String>,
  curp:             Option<String>,
  email:            Option<String>,
  password:         Option<String>,
  region_id:        Option<String>,
  category_id:      Option<String>,
  institution_id:   Option<String>,
  photo_url:        Option<String>,
}

fn parse_id(value: Option<String>, field: &str) -> Result<i64, ApiError> {
  value
    .ok_or_else(|| missing_registration_field())?
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("campo inválido: {field}")))
}

fn missing_registration_field() -> ApiError {
  ApiError::BadRequest(
    "Faltan campos obligatorios para el registro o son inválidos.".into(),
  )
}

/// `POST /api/auth/registro` — multipart with the identity fields and an
/// optional `foto` part. A rejected registration deletes the fresh photo.
pub async fn register<S>(
  State(state): State<AppState<S>>,
  mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  let mut uploads = Uploads::new(state.storage.clone());

  let outcome = async {
    let mut form = RegistrationForm::default();
    while let Some(field) = workflow::next_field(&mut multipart).await? {
      let Some(name) = field.name().map(str::to_owned) else { continue };
      match name.as_str() {
        "nombre" => form.first_name = workflow::field_text(field).await?,
        "ap_paterno" => {
          form.paternal_surname = workflow::field_text(field).await?;
        }
        "ap_materno" => {
          form.maternal_surname = workflow::field_text(field).await?;
        }
        "curp" => form.curp = workflow::field_text(field).await?,
        "correo_contacto" => form.email = workflow::field_text(field).await?,
        "password" => form.password = workflow::field_text(field).await?,
        "id_region_procedencia" => {
          form.region_id = workflow::field_text(field).await?;
        }
        "id_categoria" => form.category_id = workflow::field_text(field).await?,
        "id_institucion" => {
          form.institution_id = workflow::field_text(field).await?;
        }
        "foto" => {
          if let Some((file_name, bytes)) = workflow::file_value(field).await? {
            form.photo_url =
              Some(uploads.push("profile-photos", &file_name, bytes).await?);
          }
        }
        _ => {}
      }
    }

    let password = form.password.take().ok_or_else(missing_registration_field)?;
    let input = NewApplicant {
      first_name:       form.first_name.ok_or_else(missing_registration_field)?,
      paternal_surname: form
        .paternal_surname
        .ok_or_else(missing_registration_field)?,
      maternal_surname: form.maternal_surname,
      curp:             form.curp.ok_or_else(missing_registration_field)?,
      email:            form.email.ok_or_else(missing_registration_field)?,
      password_hash:    hash_password(&password)?,
      region_id:        parse_id(form.region_id, "id_region_procedencia")?,
      category_id:      parse_id(form.category_id, "id_categoria")?,
      // Optional: a fresh deployment has no institutions yet; they are
      // created inline during schooling saves.
      institution_id:   form
        .institution_id
        .map(|text| {
          text.parse().map_err(|_| {
            ApiError::BadRequest("campo inválido: id_institucion".into())
          })
        })
        .transpose()?,
      photo_url:        form.photo_url,
    };

    let applicant = state.store.create_applicant(input).await?;
    Ok::<_, ApiError>(applicant)
  }
  .await;

  match outcome {
    Ok(applicant) => Ok((
      StatusCode::CREATED,
      Json(json!({
        "message": "Usuario registrado exitosamente",
        "id":      applicant.id,
        "email":   applicant.email,
        "nombre":  applicant.first_name,
      })),
    )),
    Err(e) => {
      uploads.discard().await;
      Err(e)
    }
  }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(e.to_string().into()))
}

// ─── Login / logout ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
  pub email:    String,
  pub password: String,
}

fn bad_credentials() -> ApiError {
  ApiError::Unauthorized("Email o contraseña inválidos.".into())
}

/// `POST /api/auth/login` — verifies the password, sets the session
/// cookie and returns the merged profile view in one round trip.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  jar: CookieJar,
  Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  let email = request.email.trim().to_lowercase();
  let (applicant, password_hash) = state
    .store
    .applicant_by_email(email)
    .await?
    .ok_or_else(bad_credentials)?;

  let parsed = PasswordHash::new(&password_hash)
    .map_err(|e| ApiError::Internal(e.to_string().into()))?;
  Argon2::default()
    .verify_password(request.password.as_bytes(), &parsed)
    .map_err(|_| bad_credentials())?;

  let view = state
    .store
    .profile_view(applicant.id)
    .await?
    .ok_or_else(|| ApiError::NotFound("Usuario no encontrado.".into()))?;

  let token = state.sessions.issue(applicant.id)?;
  let mut body = serde_json::to_value(&view).map_err(internal)?;
  body["message"] = json!("Inicio de sesión exitoso");

  Ok((jar.add(session_cookie(token)), Json(body)))
}

/// `POST /api/auth/logout` — expires the session cookie.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
  (
    jar.add(removal_cookie()),
    Json(json!({ "message": "Sesión cerrada exitosamente." })),
  )
}

/// `GET /api/auth/me` — identity and completeness for the session holder.
pub async fn me<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  let view = state
    .store
    .profile_view(user.applicant.id)
    .await?
    .ok_or_else(|| ApiError::NotFound("Usuario no encontrado.".into()))?;
  Ok(Json(view))
}
