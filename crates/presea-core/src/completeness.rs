//! The completeness evaluator.
//!
//! Completeness is a derived boolean, never stored: it is recomputed from
//! current field values on every read and after every save. All functions
//! here are pure; given the same inputs they return the same result.

use crate::{
  profile::{Profile, SocialLink},
  schooling::Schooling,
};

/// A field passes the checklist when it is present and, for strings,
/// non-empty after trimming whitespace.
pub fn filled(value: Option<&str>) -> bool {
  value.is_some_and(|v| !v.trim().is_empty())
}

/// True only if every field in the checklist passes.
pub fn all_filled<'a>(fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
  fields.into_iter().all(filled)
}

/// Full-profile completeness.
///
/// Requires every profile field in the checklist, plus the owning
/// applicant's photo URL, plus an associated social link with a non-empty
/// URL. A missing profile row is always incomplete.
pub fn profile_complete(
  profile:   Option<&Profile>,
  photo_url: Option<&str>,
  social:    Option<&SocialLink>,
) -> bool {
  let Some(p) = profile else {
    return false;
  };

  let checklist = p.birth_date.is_some()
    && all_filled([
      p.phone.as_deref(),
      p.personal_email.as_deref(),
      p.sex.as_deref(),
      p.nationality.as_deref(),
      p.bio.as_deref(),
      p.video_url.as_deref(),
      p.institutional_evidence.as_deref(),
      p.identity_evidence.as_deref(),
      p.application_letter.as_deref(),
    ]);

  checklist
    && filled(photo_url)
    && social.is_some_and(|s| filled(Some(&s.url)))
}

/// Schooling completeness: institution reference, level, status, issue
/// date and all three evidence URLs.
pub fn schooling_complete(s: &Schooling) -> bool {
  s.institution_id.is_some()
    && s.issue_date.is_some()
    && all_filled([
      s.level.as_deref(),
      s.degree_status.as_deref(),
      s.study_proof.as_deref(),
      s.degree_file.as_deref(),
      s.license_file.as_deref(),
    ])
}

/// Child-record completeness: title, description and evidence URL.
pub fn child_complete(title: &str, description: &str, evidence_url: &str) -> bool {
  all_filled([Some(title), Some(description), Some(evidence_url)])
}
