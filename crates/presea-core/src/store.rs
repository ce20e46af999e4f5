//! The `ApplicantStore` trait.
//!
//! Implemented by storage backends (e.g. `presea-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.
//!
//! Every upsert method runs as one atomic unit of work: either the whole
//! merged field set commits or nothing does. Storage-object deletion never
//! happens inside a store method; superseded URLs are returned to the
//! caller for post-commit cleanup.

use std::future::Future;

use crate::{
  applicant::{Applicant, NewApplicant},
  catalog::{Catalog, CatalogEntry},
  profile::{ProfileDraft, ProfileSaved, ProfileView},
  record::{ChildKind, ChildRecord, NewChildRecord, NewSkill, Skill},
  schooling::{Institution, SchoolingDraft, SchoolingSaved, SchoolingView},
  Result,
};

/// Abstraction over the portal's relational store.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded async runtime (tokio with axum).
pub trait ApplicantStore: Send + Sync {
  // ── Applicants ────────────────────────────────────────────────────────

  /// Register a new applicant. Fails with
  /// [`crate::Error::IdentityTaken`] when the CURP or contact email is
  /// already registered.
  fn create_applicant(
    &self,
    input: NewApplicant,
  ) -> impl Future<Output = Result<Applicant>> + Send + '_;

  /// Fetch an applicant by id. `None` if not found.
  fn applicant(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Applicant>>> + Send + '_;

  /// Fetch an applicant and their password hash by contact email — the
  /// login lookup.
  fn applicant_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<(Applicant, String)>>> + Send + '_;

  // ── Profile (1:1 child record) ────────────────────────────────────────

  /// Read the merged profile view. `None` only when the applicant itself
  /// does not exist; an applicant without a saved profile still gets a
  /// view (all profile fields empty, completeness false).
  fn profile_view(
    &self,
    applicant_id: i64,
  ) -> impl Future<Output = Result<Option<ProfileView>>> + Send + '_;

  /// Create-or-update the profile in one transaction, per the record
  /// upsert workflow: social-link dedup by URL, static-column field
  /// merge, file slots replaced only by fresh uploads. Returns the
  /// committed view plus superseded storage URLs.
  fn upsert_profile(
    &self,
    applicant_id: i64,
    draft: ProfileDraft,
  ) -> impl Future<Output = Result<ProfileSaved>> + Send + '_;

  // ── Schooling (1:1 child record) ──────────────────────────────────────

  /// Read the schooling record joined with its institution name. `None`
  /// when no schooling row exists yet.
  fn schooling_view(
    &self,
    applicant_id: i64,
  ) -> impl Future<Output = Result<Option<SchoolingView>>> + Send + '_;

  /// Create-or-update the schooling record in one transaction, creating
  /// an inline institution first when requested. A duplicate institution
  /// name aborts the whole transaction with
  /// [`crate::Error::InstitutionExists`].
  fn upsert_schooling(
    &self,
    applicant_id: i64,
    draft: SchoolingDraft,
  ) -> impl Future<Output = Result<SchoolingSaved>> + Send + '_;

  // ── Catalogs ──────────────────────────────────────────────────────────

  fn institutions(
    &self,
  ) -> impl Future<Output = Result<Vec<Institution>>> + Send + '_;

  fn catalog(
    &self,
    which: Catalog,
  ) -> impl Future<Output = Result<Vec<CatalogEntry>>> + Send + '_;

  // ── Repeatable child records ──────────────────────────────────────────

  fn child_records(
    &self,
    kind: ChildKind,
    applicant_id: i64,
  ) -> impl Future<Output = Result<Vec<ChildRecord>>> + Send + '_;

  fn create_child_record(
    &self,
    kind: ChildKind,
    applicant_id: i64,
    input: NewChildRecord,
  ) -> impl Future<Output = Result<ChildRecord>> + Send + '_;

  /// Delete a child record owned by `applicant_id` and return its
  /// evidence URL so the caller can delete the storage object after the
  /// row is gone. Fails with [`crate::Error::RecordNotFound`] when the
  /// record is absent or belongs to someone else.
  fn delete_child_record(
    &self,
    kind: ChildKind,
    applicant_id: i64,
    record_id: i64,
  ) -> impl Future<Output = Result<String>> + Send + '_;

  // ── Skills ────────────────────────────────────────────────────────────

  fn skills(
    &self,
    applicant_id: i64,
  ) -> impl Future<Output = Result<Vec<Skill>>> + Send + '_;

  fn create_skill(
    &self,
    applicant_id: i64,
    input: NewSkill,
  ) -> impl Future<Output = Result<Skill>> + Send + '_;

  fn delete_skill(
    &self,
    applicant_id: i64,
    skill_id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;
}
