//! HTTP layer of the Presea portal.
//!
//! Exposes an axum [`Router`] backed by any
//! [`presea_core::store::ApplicantStore`] plus the evidence-file gateway.
//! Route paths and field names keep the portal's original wire contract.

pub mod auth;
pub mod datos;
pub mod error;
pub mod profile;
pub mod records;
pub mod schooling;
pub mod session;
pub mod workflow;

pub use error::ApiError;

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  routing::{delete, get, post},
  Router,
};
use presea_core::{record::ChildKind, store::ApplicantStore};
use presea_storage::EvidenceStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use session::{SessionKeys, SessionUser};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `PRESEA_*` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        std::path::PathBuf,
  pub session_secret:    String,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_hours: i64,
  pub storage:           presea_storage::StorageConfig,
}

fn default_session_ttl() -> i64 {
  24
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: ApplicantStore> {
  pub store:    Arc<S>,
  pub storage:  Arc<EvidenceStore>,
  pub sessions: Arc<SessionKeys>,
}

impl<S: ApplicantStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      storage:  Arc::clone(&self.storage),
      sessions: Arc::clone(&self.sessions),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Session lifecycle
    .route("/api/auth/registro", post(auth::register::<S>))
    .route("/api/auth/login", post(auth::login::<S>))
    .route("/api/auth/logout", post(auth::logout))
    .route("/api/auth/me", get(auth::me::<S>))
    // Singleton child records
    .route(
      "/api/perfil/{id}",
      get(profile::get_one::<S>).put(profile::update::<S>),
    )
    .route(
      "/api/escolaridad/{id}",
      get(schooling::get_one::<S>).put(schooling::upsert::<S>),
    )
    // Catalogs
    .route("/api/datos/estados", get(datos::estados::<S>))
    .route("/api/datos/regiones", get(datos::regiones::<S>))
    .route("/api/datos/categorias", get(datos::categorias::<S>))
    .route("/api/datos/instituciones", get(datos::instituciones::<S>))
    // Repeatable child records — one parameterized implementation.
    .nest("/api/logros", child_router::<S>(ChildKind::Achievement))
    .nest("/api/actividades", child_router::<S>(ChildKind::Activity))
    .nest("/api/investigacion", child_router::<S>(ChildKind::Research))
    .nest("/api/experiencia", child_router::<S>(ChildKind::Experience))
    // Skills (no evidence files)
    .route(
      "/api/habilidades/{id}",
      get(records::list_skills::<S>).post(records::create_skill::<S>),
    )
    .route(
      "/api/habilidades/{id}/{record_id}",
      delete(records::delete_skill::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::very_permissive())
    .with_state(state)
}

/// Routes for one evidence-bearing child-record kind. All four kinds share
/// the same handlers, parameterized by [`ChildKind`].
fn child_router<S>(kind: ChildKind) -> Router<AppState<S>>
where
  S: ApplicantStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/{id}",
      get(
        move |state: State<AppState<S>>, user: SessionUser, path: Path<i64>| {
          records::list::<S>(state, user, path, kind)
        },
      )
      .post(
        move |state: State<AppState<S>>,
              user: SessionUser,
              path: Path<i64>,
              multipart: axum::extract::Multipart| {
          records::create::<S>(state, user, path, multipart, kind)
        },
      ),
    )
    .route(
      "/{id}/{record_id}",
      delete(
        move |state: State<AppState<S>>, user: SessionUser, path: Path<(i64, i64)>| {
          records::remove::<S>(state, user, path, kind)
        },
      ),
    )
}
