//! Schooling read and transactional save, including inline institution
//! creation.

use axum::{
  extract::{Multipart, Path, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use presea_core::{
  schooling::{InstitutionKind, NewInstitution, SchoolingDraft},
  store::ApplicantStore,
};
use serde_json::json;

use crate::{
  profile::parse_date,
  session::SessionUser,
  workflow::{self, Uploads},
  ApiError, AppState,
};

/// `GET /api/escolaridad/{id}` — 404 until the first save.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path(applicant_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;
  let view = state.store.schooling_view(applicant_id).await?.ok_or_else(|| {
    ApiError::NotFound(
      "Datos de escolaridad no encontrados para este aspirante.".into(),
    )
  })?;
  Ok(Json(json!({
    "message": "Datos de escolaridad obtenidos exitosamente.",
    "data":    view,
  })))
}

/// `PUT /api/escolaridad/{id}` — create-or-update; 201 on first save.
///
/// An inline new institution (`newInstitutionName` + state + type) is
/// created inside the same transaction; a duplicate name rolls the whole
/// save back with 409 and the fresh uploads are deleted.
pub async fn upsert<S>(
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
    let mut draft = SchoolingDraft::default();
    let mut new_name: Option<String> = None;
    let mut new_state_id: Option<i64> = None;
    let mut new_kind: Option<InstitutionKind> = None;

    while let Some(field) = workflow::next_field(&mut multipart).await? {
      let Some(name) = field.name().map(str::to_owned) else { continue };
      match name.as_str() {
        "id_institucion" => {
          draft.institution_id = match workflow::field_text(field).await? {
            Some(text) => Some(text.parse().map_err(|_| {
              ApiError::BadRequest("campo inválido: id_institucion".into())
            })?),
            None => None,
          };
        }
        "nivel_estudios" => draft.level = workflow::field_text(field).await?,
        "titulo_obtenido" => {
          draft.degree_title = workflow::field_text(field).await?;
        }
        "estado_grado" => {
          draft.degree_status = workflow::field_text(field).await?;
        }
        "cedula_profesional" => {
          draft.license_number = workflow::field_text(field).await?;
        }
        "fecha_emision" => {
          draft.issue_date = match workflow::field_text(field).await? {
            Some(text) => Some(parse_date(&text)?),
            None => None,
          };
        }
        "newInstitutionName" => new_name = workflow::field_text(field).await?,
        "newInstitutionStateId" => {
          new_state_id = match workflow::field_text(field).await? {
            Some(text) => Some(text.parse().map_err(|_| {
              ApiError::BadRequest(
                "campo inválido: newInstitutionStateId".into(),
              )
            })?),
            None => None,
          };
        }
        "newInstitutionType" => {
          new_kind = match workflow::field_text(field).await? {
            Some(text) => Some(InstitutionKind::parse(&text).ok_or_else(
              || {
                ApiError::BadRequest(
                  "campo inválido: newInstitutionType".into(),
                )
              },
            )?),
            None => None,
          };
        }
        "constancia_file" => {
          if let Some((file_name, bytes)) = workflow::file_value(field).await? {
            draft.study_proof_url = Some(
              uploads.push("escolaridad-evidences", &file_name, bytes).await?,
            );
          }
        }
        "titulo_file" => {
          if let Some((file_name, bytes)) = workflow::file_value(field).await? {
            draft.degree_file_url = Some(
              uploads.push("escolaridad-evidences", &file_name, bytes).await?,
            );
          }
        }
        "cedula_file" => {
          if let Some((file_name, bytes)) = workflow::file_value(field).await? {
            draft.license_file_url = Some(
              uploads.push("escolaridad-evidences", &file_name, bytes).await?,
            );
          }
        }
        _ => {}
      }
    }

    if let Some(name) = new_name {
      draft.new_institution = Some(NewInstitution {
        name,
        state_id: new_state_id,
        kind: new_kind,
      });
    }

    let saved = state.store.upsert_schooling(applicant_id, draft).await?;
    Ok::<_, ApiError>(saved)
  }
  .await;

  match outcome {
    Ok(saved) => {
      state.storage.delete_all(&saved.superseded).await;
      let status =
        if saved.created { StatusCode::CREATED } else { StatusCode::OK };
      let verb = if saved.created { "creados" } else { "actualizados" };
      Ok((
        status,
        Json(json!({
          "message": format!("Datos de escolaridad {verb} exitosamente."),
          "data":    saved.view,
        })),
      ))
    }
    Err(e) => {
      uploads.discard().await;
      Err(e)
    }
  }
}
