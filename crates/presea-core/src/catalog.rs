//! Fixed lookup catalogs served to the registration and schooling forms.

use serde::{Deserialize, Serialize};

/// Which catalog table a read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
  States,
  Regions,
  Categories,
}

/// A single catalog row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
  pub id:     i64,
  #[serde(rename = "nombre")]
  pub name:   String,
}
