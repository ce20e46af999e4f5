//! Public catalog endpoints. No session required; the registration form
//! reads these before an account exists.

use axum::{extract::State, response::IntoResponse, Json};
use presea_core::{catalog::Catalog, store::ApplicantStore};

use crate::{ApiError, AppState};

pub async fn estados<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.catalog(Catalog::States).await?))
}

pub async fn regiones<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.catalog(Catalog::Regions).await?))
}

pub async fn categorias<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.catalog(Catalog::Categories).await?))
}

pub async fn instituciones<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.institutions().await?))
}
