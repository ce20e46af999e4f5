//! SQLite implementation of [`presea_core::store::ApplicantStore`].
//!
//! All errors surface as [`presea_core::Error`]; domain conditions
//! (conflicts, not-found) keep their own variants so the HTTP layer can
//! map them to proper statuses.

mod schema;
mod store;
mod tx;

#[cfg(test)]
mod tests;

pub use store::SqliteStore;
