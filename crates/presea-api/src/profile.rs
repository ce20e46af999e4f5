//! Profile read and transactional save.

use axum::{
  extract::{Multipart, Path, State},
  response::IntoResponse,
  Json,
};
use chrono::NaiveDate;
use presea_core::{profile::ProfileDraft, store::ApplicantStore};
use serde_json::json;

use crate::{
  session::SessionUser,
  workflow::{self, Uploads},
  ApiError, AppState,
};

/// `GET /api/perfil/{id}` — merged profile view with completeness.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path(applicant_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;
  let view = state
    .store
    .profile_view(applicant_id)
    .await?
    .ok_or_else(|| ApiError::NotFound("Usuario no encontrado.".into()))?;
  Ok(Json(view))
}

/// `PUT /api/perfil/{id}` — the full profile save workflow.
///
/// Order matters: ownership check, then uploads, then one store
/// transaction, then post-commit cleanup of superseded objects. A store
/// failure deletes this request's fresh uploads instead.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path(applicant_id): Path<i64>,
  mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;

  let mut uploads = Uploads::new(state.storage.clone());

  let outcome = async {
    let mut draft = ProfileDraft::default();
    while let Some(field) = workflow::next_field(&mut multipart).await? {
      let Some(name) = field.name().map(str::to_owned) else { continue };
      match name.as_str() {
        "telefono" => draft.phone = workflow::field_text(field).await?,
        "fechaNacimiento" => {
          draft.birth_date = match workflow::field_text(field).await? {
            Some(text) => Some(parse_date(&text)?),
            None => None,
          };
        }
        "correoOpcional" => {
          draft.personal_email = workflow::field_text(field).await?;
        }
        "sexo" => draft.sex = workflow::field_text(field).await?,
        "nacionalidad" => draft.nationality = workflow::field_text(field).await?,
        "resenaCurricular" => draft.bio = workflow::field_text(field).await?,
        "redSocial" => draft.social_url = workflow::field_text(field).await?,
        "videoUrl" => draft.video_url = workflow::field_text(field).await?,
        "foto" => {
          if let Some((file_name, bytes)) = workflow::file_value(field).await? {
            draft.photo_url =
              Some(uploads.push("profile-photos", &file_name, bytes).await?);
          }
        }
        "evidenciaInstitucional" => {
          if let Some((file_name, bytes)) = workflow::file_value(field).await? {
            draft.institutional_evidence_url =
              Some(uploads.push("profile-evidences", &file_name, bytes).await?);
          }
        }
        "evidenciaIdentidad" => {
          if let Some((file_name, bytes)) = workflow::file_value(field).await? {
            draft.identity_evidence_url =
              Some(uploads.push("profile-evidences", &file_name, bytes).await?);
          }
        }
        "cartaPostulacion" => {
          if let Some((file_name, bytes)) = workflow::file_value(field).await? {
            draft.application_letter_url =
              Some(uploads.push("profile-evidences", &file_name, bytes).await?);
          }
        }
        _ => {}
      }
    }

    let saved = state.store.upsert_profile(applicant_id, draft).await?;
    Ok::<_, ApiError>(saved)
  }
  .await;

  match outcome {
    Ok(saved) => {
      // Post-commit, best-effort: replaced objects are already
      // unreferenced by the committed row.
      state.storage.delete_all(&saved.superseded).await;
      Ok(Json(json!({
        "message": "Profile saved successfully.",
        "profile": saved.view,
      })))
    }
    Err(e) => {
      uploads.discard().await;
      Err(e)
    }
  }
}

pub(crate) fn parse_date(text: &str) -> Result<NaiveDate, ApiError> {
  NaiveDate::parse_from_str(text, "%Y-%m-%d")
    .map_err(|_| ApiError::BadRequest(format!("fecha inválida: {text}")))
}
