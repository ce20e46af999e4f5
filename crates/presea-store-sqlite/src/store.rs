//! [`SqliteStore`] — the SQLite implementation of
//! [`ApplicantStore`](presea_core::store::ApplicantStore).

use std::path::Path;

use presea_core::{
  applicant::{Applicant, NewApplicant},
  catalog::{Catalog, CatalogEntry},
  profile::{ProfileDraft, ProfileSaved, ProfileView},
  record::{ChildKind, ChildRecord, NewChildRecord, NewSkill, Skill},
  schooling::{Institution, SchoolingDraft, SchoolingSaved, SchoolingView},
  store::ApplicantStore,
  Error, Result,
};

use crate::{schema::SCHEMA, tx};

/// A Presea store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The
/// connection is the process-wide shared resource: each store method is a
/// single `call`, so a request's transaction occupies the background
/// connection for its whole critical section and releases it on every
/// exit path.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

fn closed(e: tokio_rusqlite::Error) -> Error {
  Error::Store(Box::new(e))
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await.map_err(closed)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(closed)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(closed)
  }
}

impl ApplicantStore for SqliteStore {
  // ── Applicants ────────────────────────────────────────────────────────

  async fn create_applicant(&self, input: NewApplicant) -> Result<Applicant> {
    self
      .conn
      .call(move |conn| Ok(tx::create_applicant(conn, input)))
      .await
      .map_err(closed)?
  }

  async fn applicant(&self, id: i64) -> Result<Option<Applicant>> {
    self
      .conn
      .call(move |conn| Ok(tx::load_applicant(conn, id)))
      .await
      .map_err(closed)?
  }

  async fn applicant_by_email(&self, email: String) -> Result<Option<(Applicant, String)>> {
    self
      .conn
      .call(move |conn| Ok(tx::applicant_by_email(conn, &email)))
      .await
      .map_err(closed)?
  }

  // ── Profile ───────────────────────────────────────────────────────────

  async fn profile_view(&self, applicant_id: i64) -> Result<Option<ProfileView>> {
    self
      .conn
      .call(move |conn| Ok(tx::profile_view(conn, applicant_id)))
      .await
      .map_err(closed)?
  }

  async fn upsert_profile(
    &self,
    applicant_id: i64,
    draft: ProfileDraft,
  ) -> Result<ProfileSaved> {
    self
      .conn
      .call(move |conn| Ok(tx::upsert_profile(conn, applicant_id, draft)))
      .await
      .map_err(closed)?
  }

  // ── Schooling ─────────────────────────────────────────────────────────

  async fn schooling_view(&self, applicant_id: i64) -> Result<Option<SchoolingView>> {
    self
      .conn
      .call(move |conn| Ok(tx::schooling_view(conn, applicant_id)))
      .await
      .map_err(closed)?
  }

  async fn upsert_schooling(
    &self,
    applicant_id: i64,
    draft: SchoolingDraft,
  ) -> Result<SchoolingSaved> {
    self
      .conn
      .call(move |conn| Ok(tx::upsert_schooling(conn, applicant_id, draft)))
      .await
      .map_err(closed)?
  }

  // ── Catalogs ──────────────────────────────────────────────────────────

  async fn institutions(&self) -> Result<Vec<Institution>> {
    self
      .conn
      .call(move |conn| Ok(tx::institutions(conn)))
      .await
      .map_err(closed)?
  }

  async fn catalog(&self, which: Catalog) -> Result<Vec<CatalogEntry>> {
    self
      .conn
      .call(move |conn| Ok(tx::catalog(conn, which)))
      .await
      .map_err(closed)?
  }

  // ── Repeatable child records ──────────────────────────────────────────

  async fn child_records(
    &self,
    kind: ChildKind,
    applicant_id: i64,
  ) -> Result<Vec<ChildRecord>> {
    self
      .conn
      .call(move |conn| Ok(tx::child_records(conn, kind, applicant_id)))
      .await
      .map_err(closed)?
  }

  async fn create_child_record(
    &self,
    kind: ChildKind,
    applicant_id: i64,
    input: NewChildRecord,
  ) -> Result<ChildRecord> {
    self
      .conn
      .call(move |conn| Ok(tx::create_child_record(conn, kind, applicant_id, input)))
      .await
      .map_err(closed)?
  }

  async fn delete_child_record(
    &self,
    kind: ChildKind,
    applicant_id: i64,
    record_id: i64,
  ) -> Result<String> {
    self
      .conn
      .call(move |conn| Ok(tx::delete_child_record(conn, kind, applicant_id, record_id)))
      .await
      .map_err(closed)?
  }

  // ── Skills ────────────────────────────────────────────────────────────

  async fn skills(&self, applicant_id: i64) -> Result<Vec<Skill>> {
    self
      .conn
      .call(move |conn| Ok(tx::skills(conn, applicant_id)))
      .await
      .map_err(closed)?
  }

  async fn create_skill(&self, applicant_id: i64, input: NewSkill) -> Result<Skill> {
    self
      .conn
      .call(move |conn| Ok(tx::create_skill(conn, applicant_id, input)))
      .await
      .map_err(closed)?
  }

  async fn delete_skill(&self, applicant_id: i64, skill_id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| Ok(tx::delete_skill(conn, applicant_id, skill_id)))
      .await
      .map_err(closed)?
  }
}
