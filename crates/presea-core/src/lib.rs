//! Core domain types for the Presea applicant portal.
//!
//! This crate holds the entities (applicant, profile, schooling, child
//! records), the completeness evaluator, and the [`store::ApplicantStore`]
//! trait that storage backends implement. It performs no I/O.

pub mod applicant;
pub mod catalog;
pub mod completeness;
pub mod error;
pub mod profile;
pub mod record;
pub mod schooling;
pub mod store;

pub use error::{Error, Result};
