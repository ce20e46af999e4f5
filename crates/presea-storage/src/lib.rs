//! [`EvidenceStore`] — the object-storage gateway for evidence files.
//!
//! Backed by an R2-compatible S3 bucket in production and by opendal's
//! memory service in tests. Objects are addressed by stable public URLs
//! (`{public_url}/{key}`) served directly by the bucket; this system never
//! proxies file bytes after upload.
//!
//! Deletion is defensive: a URL that this gateway did not issue (wrong
//! prefix, empty string) is never touched, and delete failures are logged
//! rather than propagated — a failed delete leaves a harmless orphan,
//! never a dangling reference.

use opendal::{services, Operator};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  /// Fatal configuration error: callers must fail startup, not skip.
  #[error("storage public URL prefix is not configured")]
  PublicUrlUnconfigured,

  #[error("object storage error: {0}")]
  Opendal(#[from] opendal::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Bucket wiring, deserialised from the `[storage]` section of the server
/// configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
  pub endpoint:          String,
  pub access_key_id:     String,
  pub secret_access_key: String,
  pub bucket:            String,
  #[serde(default = "default_region")]
  pub region:            String,
  /// Public prefix under which the bucket serves objects, no trailing
  /// slash (e.g. `https://files.example.org`).
  pub public_url:        String,
}

fn default_region() -> String {
  "auto".to_string()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Evidence-file gateway. Cloning is cheap — the inner operator is
/// reference-counted.
#[derive(Clone)]
pub struct EvidenceStore {
  op:         Operator,
  public_url: String,
}

impl EvidenceStore {
  /// Open the configured S3/R2 bucket. An empty public URL prefix is a
  /// startup-time configuration error.
  pub fn open(config: &StorageConfig) -> Result<Self> {
    if config.public_url.trim().is_empty() {
      return Err(Error::PublicUrlUnconfigured);
    }

    let builder = services::S3::default()
      .endpoint(&config.endpoint)
      .access_key_id(&config.access_key_id)
      .secret_access_key(&config.secret_access_key)
      .bucket(&config.bucket)
      .region(&config.region);

    let op = Operator::new(builder)?.finish();
    Ok(Self {
      op,
      public_url: config.public_url.trim_end_matches('/').to_string(),
    })
  }

  /// In-memory gateway for tests, issuing URLs under `public_url`.
  pub fn in_memory(public_url: &str) -> Result<Self> {
    if public_url.trim().is_empty() {
      return Err(Error::PublicUrlUnconfigured);
    }
    let op = Operator::new(services::Memory::default())?.finish();
    Ok(Self {
      op,
      public_url: public_url.trim_end_matches('/').to_string(),
    })
  }

  /// Deterministic public URL for a storage key.
  pub fn url_for(&self, key: &str) -> String {
    format!("{}/{}", self.public_url, key)
  }

  /// Upload a file under `folder` with a collision-free key and return
  /// its public URL. This is the only way evidence objects are created.
  pub async fn upload(
    &self,
    folder:    &str,
    file_name: &str,
    bytes:     Vec<u8>,
  ) -> Result<String> {
    let key = format!("{folder}/{}-{file_name}", Uuid::new_v4());
    self.op.write(&key, bytes).await?;
    tracing::debug!(%key, "uploaded evidence object");
    Ok(self.url_for(&key))
  }

  /// Best-effort delete of the object behind `url`.
  ///
  /// No-op when the URL is empty or does not start with the configured
  /// public prefix — this gateway never deletes something it didn't
  /// serve. Errors are logged and swallowed; they must never abort a
  /// caller's otherwise-successful request.
  pub async fn delete_by_url(&self, url: &str) {
    if url.is_empty() {
      return;
    }

    let prefix = format!("{}/", self.public_url);
    let Some(key) = url.strip_prefix(&prefix) else {
      tracing::warn!(%url, "refusing to delete URL outside the public prefix");
      return;
    };

    match self.op.delete(key).await {
      Ok(()) => tracing::debug!(%key, "deleted evidence object"),
      Err(e) => tracing::error!(%key, error = %e, "evidence delete failed"),
    }
  }

  /// Delete every URL in `urls`, best-effort, in order.
  pub async fn delete_all(&self, urls: &[String]) {
    for url in urls {
      self.delete_by_url(url).await;
    }
  }

  /// Whether the object behind `url` currently exists. Test helper; the
  /// request path never reads objects back.
  pub async fn contains(&self, url: &str) -> Result<bool> {
    let prefix = format!("{}/", self.public_url);
    match url.strip_prefix(&prefix) {
      Some(key) => Ok(self.op.exists(key).await?),
      None => Ok(false),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn store() -> EvidenceStore {
    EvidenceStore::in_memory("https://files.test").expect("memory store")
  }

  #[test]
  fn empty_public_url_is_a_config_error() {
    assert!(matches!(
      EvidenceStore::in_memory("  "),
      Err(Error::PublicUrlUnconfigured)
    ));
  }

  #[tokio::test]
  async fn upload_returns_prefixed_url_and_stores_object() {
    let s = store();
    let url = s
      .upload("profile-evidences", "carta.pdf", b"pdf".to_vec())
      .await
      .unwrap();

    assert!(url.starts_with("https://files.test/profile-evidences/"));
    assert!(url.ends_with("-carta.pdf"));
    assert!(s.contains(&url).await.unwrap());
  }

  #[tokio::test]
  async fn delete_by_url_removes_object() {
    let s = store();
    let url = s.upload("d", "a.png", b"x".to_vec()).await.unwrap();
    s.delete_by_url(&url).await;
    assert!(!s.contains(&url).await.unwrap());
  }

  #[tokio::test]
  async fn delete_ignores_foreign_and_empty_urls() {
    let s = store();
    let url = s.upload("d", "a.png", b"x".to_vec()).await.unwrap();

    // Neither of these may touch the stored object.
    s.delete_by_url("").await;
    s.delete_by_url("https://elsewhere.test/d/a.png").await;
    assert!(s.contains(&url).await.unwrap());
  }

  #[tokio::test]
  async fn delete_missing_object_is_swallowed() {
    let s = store();
    // Must not panic or error out.
    s.delete_by_url("https://files.test/d/never-uploaded.pdf").await;
  }

  #[tokio::test]
  async fn unique_keys_for_same_file_name() {
    let s = store();
    let a = s.upload("d", "same.pdf", b"1".to_vec()).await.unwrap();
    let b = s.upload("d", "same.pdf", b"2".to_vec()).await.unwrap();
    assert_ne!(a, b);
  }
}
