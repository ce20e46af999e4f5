//! Repeatable child records — achievements, activities, research, work
//! experience — behind one parameterized set of handlers, plus skills.

use axum::{
  extract::{Multipart, Path, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use presea_core::{
  record::{ChildKind, NewChildRecord, NewSkill},
  store::ApplicantStore,
};
use serde_json::json;

use crate::{
  session::SessionUser,
  workflow::{self, Uploads},
  ApiError, AppState,
};

/// Per-kind wire details: the multipart field carrying the evidence file
/// and the storage folder its objects land in.
struct KindRoute {
  evidence_field: &'static str,
  folder:         &'static str,
}

const fn kind_route(kind: ChildKind) -> KindRoute {
  match kind {
    ChildKind::Achievement => KindRoute {
      evidence_field: "evidencia_file",
      folder:         "logros-evidences",
    },
    ChildKind::Activity => KindRoute {
      evidence_field: "archivo",
      folder:         "actividades-evidences",
    },
    ChildKind::Research => KindRoute {
      evidence_field: "evidencia_file",
      folder:         "investigacion-evidences",
    },
    ChildKind::Experience => KindRoute {
      evidence_field: "evidencia_file",
      folder:         "experiencia-evidences",
    },
  }
}

// ─── Evidence-bearing records ─────────────────────────────────────────────────

/// List an applicant's records of one kind. An empty list is a normal
/// answer, not an error.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path(applicant_id): Path<i64>,
  kind: ChildKind,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;
  let records = state.store.child_records(kind, applicant_id).await?;
  Ok(Json(json!({
    "message": "Registros obtenidos exitosamente.",
    "data":    records,
  })))
}

/// Create one record: title, description and the evidence file are all
/// required. The file is uploaded first; a failed insert deletes it.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path(applicant_id): Path<i64>,
  mut multipart: Multipart,
  kind: ChildKind,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;

  let route = kind_route(kind);
  let mut uploads = Uploads::new(state.storage.clone());

  let outcome = async {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut evidence_url: Option<String> = None;

    while let Some(field) = workflow::next_field(&mut multipart).await? {
      let Some(name) = field.name().map(str::to_owned) else { continue };
      if name == "titulo" {
        title = workflow::field_text(field).await?;
      } else if name == "descripcion" {
        description = workflow::field_text(field).await?;
      } else if name == route.evidence_field {
        if let Some((file_name, bytes)) = workflow::file_value(field).await? {
          evidence_url =
            Some(uploads.push(route.folder, &file_name, bytes).await?);
        }
      }
    }

    let (Some(title), Some(description), Some(evidence_url)) =
      (title, description, evidence_url)
    else {
      return Err(ApiError::BadRequest(
        "Faltan campos obligatorios (título, descripción o archivo de evidencia)."
          .into(),
      ));
    };

    let record = state
      .store
      .create_child_record(
        kind,
        applicant_id,
        NewChildRecord { title, description, evidence_url },
      )
      .await?;
    Ok::<_, ApiError>(record)
  }
  .await;

  match outcome {
    Ok(record) => Ok((
      StatusCode::CREATED,
      Json(json!({
        "message": "Registro agregado exitosamente.",
        "data":    record,
      })),
    )),
    Err(e) => {
      uploads.discard().await;
      Err(e)
    }
  }
}

/// Delete one record, then its evidence object (post-commit,
/// best-effort).
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path((applicant_id, record_id)): Path<(i64, i64)>,
  kind: ChildKind,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;
  let evidence_url = state
    .store
    .delete_child_record(kind, applicant_id, record_id)
    .await?;
  state.storage.delete_by_url(&evidence_url).await;
  Ok(Json(json!({ "message": "Registro eliminado exitosamente." })))
}

// ─── Skills ───────────────────────────────────────────────────────────────────

pub async fn list_skills<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path(applicant_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;
  let skills = state.store.skills(applicant_id).await?;
  Ok(Json(skills))
}

pub async fn create_skill<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path(applicant_id): Path<i64>,
  Json(input): Json<NewSkill>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;
  if input.title.trim().is_empty() {
    return Err(ApiError::BadRequest("El título es obligatorio.".into()));
  }
  if !(0..=100).contains(&input.percentage) {
    return Err(ApiError::BadRequest(
      "El porcentaje debe estar entre 0 y 100.".into(),
    ));
  }
  let skill = state.store.create_skill(applicant_id, input).await?;
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Habilidad agregada exitosamente.",
      "data":    skill,
    })),
  ))
}

pub async fn delete_skill<S>(
  State(state): State<AppState<S>>,
  user: SessionUser,
  Path((applicant_id, skill_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  workflow::ensure_owner(&user, applicant_id)?;
  state.store.delete_skill(applicant_id, skill_id).await?;
  Ok(Json(json!({ "message": "Habilidad eliminada exitosamente." })))
}
