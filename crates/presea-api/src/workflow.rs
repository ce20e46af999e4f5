//! Shared pieces of the record upsert workflow: multipart field handling
//! and the fresh-upload tracker.
//!
//! Handlers upload evidence files *before* calling the store so the draft
//! can carry final URLs. If the store then fails, the fresh objects must
//! not leak; [`Uploads`] remembers them for exactly that rollback.

use std::sync::Arc;

use axum::extract::multipart::{Field, Multipart};
use presea_storage::EvidenceStore;

use crate::{session::SessionUser, ApiError};

/// Resource ownership gate: the session holder may only touch records
/// under their own applicant id. Runs before any upload or store call so
/// a forbidden request has zero side effects.
pub fn ensure_owner(user: &SessionUser, applicant_id: i64) -> Result<(), ApiError> {
  if user.applicant.id == applicant_id {
    Ok(())
  } else {
    Err(ApiError::Forbidden)
  }
}

/// Tracks evidence objects uploaded during one request.
pub struct Uploads {
  storage: Arc<EvidenceStore>,
  urls:    Vec<String>,
}

impl Uploads {
  pub fn new(storage: Arc<EvidenceStore>) -> Self {
    Self { storage, urls: Vec::new() }
  }

  /// Upload one file and remember its URL for potential rollback.
  pub async fn push(
    &mut self,
    folder: &str,
    file_name: &str,
    bytes: Vec<u8>,
  ) -> Result<String, ApiError> {
    let url = self
      .storage
      .upload(folder, file_name, bytes)
      .await
      .map_err(|e| ApiError::Internal(Box::new(e)))?;
    self.urls.push(url.clone());
    Ok(url)
  }

  /// The store rejected the draft: delete everything uploaded so far.
  /// Deletion failures are logged inside the storage layer, not surfaced.
  pub async fn discard(self) {
    self.storage.delete_all(&self.urls).await;
  }
}

/// Read a text field, trimming whitespace. Blank fields collapse to
/// `None` so the store writes NULL instead of empty strings.
pub fn text_value(text: String) -> Option<String> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_owned())
  }
}

/// Drain a file field into `(file_name, bytes)`. Empty uploads (no bytes
/// or no filename) are treated as "field not sent".
pub async fn file_value(
  field: Field<'_>,
) -> Result<Option<(String, Vec<u8>)>, ApiError> {
  let file_name = match field.file_name() {
    Some(name) if !name.is_empty() => name.to_owned(),
    _ => return Ok(None),
  };
  let bytes = field.bytes().await.map_err(bad_multipart)?;
  if bytes.is_empty() {
    return Ok(None);
  }
  Ok(Some((file_name, bytes.to_vec())))
}

/// Pull the next multipart field, mapping protocol errors to 400.
pub async fn next_field<'a>(
  multipart: &'a mut Multipart,
) -> Result<Option<Field<'a>>, ApiError> {
  multipart.next_field().await.map_err(bad_multipart)
}

/// Read a text field's body, mapping protocol errors to 400.
pub async fn field_text(field: Field<'_>) -> Result<Option<String>, ApiError> {
  let text = field.text().await.map_err(bad_multipart)?;
  Ok(text_value(text))
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
  ApiError::BadRequest(format!("formulario multipart inválido: {e}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_text_collapses_to_none() {
    assert_eq!(text_value("  ".into()), None);
    assert_eq!(text_value("".into()), None);
    assert_eq!(text_value(" hola ".into()), Some("hola".into()));
  }

  #[tokio::test]
  async fn discard_removes_fresh_objects() {
    let storage =
      Arc::new(EvidenceStore::in_memory("https://files.test").unwrap());
    let mut uploads = Uploads::new(Arc::clone(&storage));
    let url = uploads
      .push("profile-evidences", "cv.pdf", b"pdf".to_vec())
      .await
      .unwrap();
    assert!(storage.contains(&url).await.unwrap());

    uploads.discard().await;
    assert!(!storage.contains(&url).await.unwrap());
  }
}
