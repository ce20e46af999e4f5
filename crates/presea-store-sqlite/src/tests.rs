//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use presea_core::{
  applicant::NewApplicant,
  catalog::Catalog,
  profile::ProfileDraft,
  record::{ChildKind, NewChildRecord, NewSkill},
  schooling::{InstitutionKind, NewInstitution, SchoolingDraft},
  store::ApplicantStore,
  Error,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn new_applicant(curp: &str, email: &str) -> NewApplicant {
  NewApplicant {
    first_name:       "Ana".into(),
    paternal_surname: "García".into(),
    maternal_surname: Some("López".into()),
    curp:             curp.into(),
    email:            email.into(),
    password_hash:    "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
    region_id:        2,
    category_id:      1,
    institution_id:   None,
    photo_url:        None,
  }
}

async fn seed_applicant(s: &SqliteStore) -> i64 {
  s.create_applicant(new_applicant("GAQA000101MDFXXX01", "ana@example.com"))
    .await
    .expect("seed applicant")
    .id
}

/// Count rows via raw SQL; assertions on table state, not the API.
async fn count(s: &SqliteStore, sql: &'static str) -> i64 {
  s.conn
    .call(move |conn| Ok(conn.query_row(sql, [], |r| r.get::<_, i64>(0))))
    .await
    .unwrap()
    .unwrap()
}

// ─── Applicants ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_and_fetch_applicant() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let fetched = s.applicant(id).await.unwrap().unwrap();
  assert_eq!(fetched.first_name, "Ana");
  assert_eq!(fetched.curp, "GAQA000101MDFXXX01");
  assert!(fetched.photo_url.is_none());
}

#[tokio::test]
async fn duplicate_curp_or_email_is_identity_taken() {
  let s = store().await;
  seed_applicant(&s).await;

  let same_curp = s
    .create_applicant(new_applicant("GAQA000101MDFXXX01", "otra@example.com"))
    .await;
  assert!(matches!(same_curp, Err(Error::IdentityTaken)));

  let same_email = s
    .create_applicant(new_applicant("XXXX000101MDFXXX02", "ana@example.com"))
    .await;
  assert!(matches!(same_email, Err(Error::IdentityTaken)));
}

#[tokio::test]
async fn login_lookup_returns_password_hash() {
  let s = store().await;
  seed_applicant(&s).await;

  let (applicant, hash) = s
    .applicant_by_email("ana@example.com".into())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(applicant.email, "ana@example.com");
  assert!(hash.starts_with("$argon2id$"));

  assert!(s.applicant_by_email("nadie@example.com".into()).await.unwrap().is_none());
}

// ─── Profile upsert ──────────────────────────────────────────────────────────

#[tokio::test]
async fn view_without_profile_row_is_empty_and_incomplete() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let view = s.profile_view(id).await.unwrap().unwrap();
  assert!(view.phone.is_none());
  assert!(view.social_url.is_none());
  assert!(!view.complete);
}

#[tokio::test]
async fn view_of_missing_applicant_is_none() {
  let s = store().await;
  assert!(s.profile_view(999).await.unwrap().is_none());
}

#[tokio::test]
async fn first_save_creates_profile_with_social_link() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let draft = ProfileDraft {
    phone:                      Some("555".into()),
    sex:                        Some("F".into()),
    nationality:                Some("MX".into()),
    social_url:                 Some("https://github.com/abc".into()),
    institutional_evidence_url: Some("https://files.test/pe/a-const.pdf".into()),
    ..Default::default()
  };
  let saved = s.upsert_profile(id, draft).await.unwrap();

  assert!(saved.created);
  assert!(saved.superseded.is_empty());
  let v = &saved.view;
  assert_eq!(v.phone.as_deref(), Some("555"));
  assert_eq!(v.social_url.as_deref(), Some("https://github.com/abc"));
  assert_eq!(
    v.institutional_evidence.as_deref(),
    Some("https://files.test/pe/a-const.pdf")
  );
  // Untouched slots stay empty.
  assert!(v.identity_evidence.is_none());
  assert!(v.application_letter.is_none());
  // Missing bio, video, photo and the other evidences: incomplete.
  assert!(!v.complete);

  let name: String = s
    .conn
    .call(move |conn| {
      Ok(conn.query_row(
        "SELECT nombre_red_social FROM redes_sociales WHERE id_aspirante = ?1",
        [id],
        |r| r.get(0),
      ))
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(name, "GitHub");
}

#[tokio::test]
async fn resave_without_files_is_idempotent() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let draft = ProfileDraft {
    phone:                      Some("555".into()),
    bio:                        Some("bio".into()),
    social_url:                 Some("https://linkedin.com/in/x".into()),
    institutional_evidence_url: Some("https://files.test/pe/a.pdf".into()),
    ..Default::default()
  };
  let first = s.upsert_profile(id, draft.clone()).await.unwrap();

  let resave = ProfileDraft {
    institutional_evidence_url: None,
    ..draft
  };
  let second = s.upsert_profile(id, resave.clone()).await.unwrap();
  let third = s.upsert_profile(id, resave).await.unwrap();

  assert!(first.created);
  assert!(!second.created);
  // No file uploads: nothing superseded, evidence untouched.
  assert!(second.superseded.is_empty());
  assert!(third.superseded.is_empty());
  assert_eq!(
    second.view.institutional_evidence.as_deref(),
    Some("https://files.test/pe/a.pdf")
  );
  assert_eq!(
    serde_json::to_value(&second.view).unwrap(),
    serde_json::to_value(&third.view).unwrap()
  );
}

#[tokio::test]
async fn fresh_upload_supersedes_exactly_the_replaced_url() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let first = ProfileDraft {
    institutional_evidence_url: Some("https://files.test/pe/A.pdf".into()),
    identity_evidence_url:      Some("https://files.test/pe/ID.pdf".into()),
    ..Default::default()
  };
  s.upsert_profile(id, first).await.unwrap();

  // Replace only the institutional slot.
  let second = ProfileDraft {
    institutional_evidence_url: Some("https://files.test/pe/B.pdf".into()),
    ..Default::default()
  };
  let saved = s.upsert_profile(id, second).await.unwrap();

  assert_eq!(saved.superseded, vec!["https://files.test/pe/A.pdf".to_string()]);
  assert_eq!(
    saved.view.institutional_evidence.as_deref(),
    Some("https://files.test/pe/B.pdf")
  );
  // The untouched slot keeps its URL and is not scheduled for deletion.
  assert_eq!(
    saved.view.identity_evidence.as_deref(),
    Some("https://files.test/pe/ID.pdf")
  );
}

#[tokio::test]
async fn photo_replacement_supersedes_old_photo() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let first = ProfileDraft {
    photo_url: Some("https://files.test/fotos/v1.png".into()),
    ..Default::default()
  };
  s.upsert_profile(id, first).await.unwrap();

  let second = ProfileDraft {
    photo_url: Some("https://files.test/fotos/v2.png".into()),
    ..Default::default()
  };
  let saved = s.upsert_profile(id, second).await.unwrap();

  assert_eq!(saved.superseded, vec!["https://files.test/fotos/v1.png".to_string()]);
  assert_eq!(saved.view.photo_url.as_deref(), Some("https://files.test/fotos/v2.png"));
}

#[tokio::test]
async fn social_link_dedup_by_url() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let draft = ProfileDraft {
    social_url: Some("https://linkedin.com/in/x".into()),
    ..Default::default()
  };
  s.upsert_profile(id, draft.clone()).await.unwrap();
  s.upsert_profile(id, draft).await.unwrap();

  let rows = count(&s, "SELECT COUNT(*) FROM redes_sociales").await;
  assert_eq!(rows, 1);

  let name: String = s
    .conn
    .call(move |conn| {
      Ok(conn.query_row(
        "SELECT nombre_red_social FROM redes_sociales
          WHERE id_aspirante = ?1 AND link_red_social = 'https://linkedin.com/in/x'",
        [id],
        |r| r.get(0),
      ))
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(name, "LinkedIn");
}

#[tokio::test]
async fn profile_becomes_complete_when_checklist_passes() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let draft = ProfileDraft {
    phone:                      Some("5551234".into()),
    birth_date:                 NaiveDate::from_ymd_opt(2001, 3, 9),
    personal_email:             Some("p@example.com".into()),
    sex:                        Some("F".into()),
    nationality:                Some("MX".into()),
    bio:                        Some("Reseña".into()),
    video_url:                  Some("https://videos.test/v".into()),
    social_url:                 Some("https://github.com/abc".into()),
    photo_url:                  Some("https://files.test/fotos/f.png".into()),
    institutional_evidence_url: Some("https://files.test/pe/1.pdf".into()),
    identity_evidence_url:      Some("https://files.test/pe/2.pdf".into()),
    application_letter_url:     Some("https://files.test/pe/3.pdf".into()),
  };
  let saved = s.upsert_profile(id, draft).await.unwrap();
  assert!(saved.view.complete);

  // Clearing the bio flips it back.
  let cleared = ProfileDraft {
    phone:          Some("5551234".into()),
    birth_date:     NaiveDate::from_ymd_opt(2001, 3, 9),
    personal_email: Some("p@example.com".into()),
    sex:            Some("F".into()),
    nationality:    Some("MX".into()),
    bio:            None,
    video_url:      Some("https://videos.test/v".into()),
    social_url:     Some("https://github.com/abc".into()),
    ..Default::default()
  };
  let saved = s.upsert_profile(id, cleared).await.unwrap();
  assert!(!saved.view.complete);
}

// ─── Schooling upsert ────────────────────────────────────────────────────────

fn schooling_draft() -> SchoolingDraft {
  SchoolingDraft {
    new_institution: Some(NewInstitution {
      name:     "Tec de Colima".into(),
      state_id: Some(9),
      kind:     Some(InstitutionKind::Publica),
    }),
    level:            Some("Licenciatura".into()),
    degree_status:    Some("titulado".into()),
    issue_date:       NaiveDate::from_ymd_opt(2022, 6, 1),
    study_proof_url:  Some("https://files.test/esc/constancia.pdf".into()),
    degree_file_url:  Some("https://files.test/esc/titulo.pdf".into()),
    license_file_url: Some("https://files.test/esc/cedula.pdf".into()),
    ..Default::default()
  }
}

#[tokio::test]
async fn schooling_first_save_creates_row_and_institution() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let saved = s.upsert_schooling(id, schooling_draft()).await.unwrap();
  assert!(saved.created);
  assert_eq!(saved.view.institution_name.as_deref(), Some("Tec de Colima"));
  assert!(saved.view.complete);

  assert!(s.schooling_view(id).await.unwrap().is_some());
}

#[tokio::test]
async fn schooling_missing_on_read_is_none() {
  let s = store().await;
  let id = seed_applicant(&s).await;
  assert!(s.schooling_view(id).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_institution_name_is_a_conflict() {
  let s = store().await;
  let id = seed_applicant(&s).await;
  s.upsert_schooling(id, schooling_draft()).await.unwrap();

  let again = s.upsert_schooling(id, schooling_draft()).await;
  assert!(matches!(again, Err(Error::InstitutionExists(_))));
}

#[tokio::test]
async fn failed_save_rolls_back_inline_institution() {
  let s = store().await;

  // Applicant 999 does not exist; the save fails after the institution
  // insert, which must roll back with the rest of the transaction.
  let draft = SchoolingDraft {
    new_institution: Some(NewInstitution {
      name:     "Tech Univ".into(),
      state_id: Some(5),
      kind:     Some(InstitutionKind::Publica),
    }),
    ..Default::default()
  };
  let result = s.upsert_schooling(999, draft).await;
  assert!(matches!(result, Err(Error::ApplicantNotFound(999))));

  let rows = count(
    &s,
    "SELECT COUNT(*) FROM institucion WHERE nombre_institucion = 'Tech Univ'",
  )
  .await;
  assert_eq!(rows, 0);
}

#[tokio::test]
async fn inline_institution_requires_state_and_type() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let draft = SchoolingDraft {
    new_institution: Some(NewInstitution {
      name:     "Sin Tipo".into(),
      state_id: Some(5),
      kind:     None,
    }),
    ..Default::default()
  };
  let result = s.upsert_schooling(id, draft).await;
  assert!(matches!(result, Err(Error::MissingField("newInstitutionType"))));

  let rows =
    count(&s, "SELECT COUNT(*) FROM institucion WHERE nombre_institucion = 'Sin Tipo'").await;
  assert_eq!(rows, 0);
}

#[tokio::test]
async fn schooling_update_supersedes_replaced_files_only() {
  let s = store().await;
  let id = seed_applicant(&s).await;
  s.upsert_schooling(id, schooling_draft()).await.unwrap();

  let update = SchoolingDraft {
    level:           Some("Maestría".into()),
    degree_status:   Some("titulado".into()),
    issue_date:      NaiveDate::from_ymd_opt(2024, 1, 10),
    study_proof_url: Some("https://files.test/esc/constancia-v2.pdf".into()),
    ..Default::default()
  };
  let saved = s.upsert_schooling(id, update).await.unwrap();

  assert!(!saved.created);
  assert_eq!(saved.superseded, vec!["https://files.test/esc/constancia.pdf".to_string()]);
  assert_eq!(saved.view.level.as_deref(), Some("Maestría"));
  assert_eq!(
    saved.view.degree_file.as_deref(),
    Some("https://files.test/esc/titulo.pdf")
  );
  // The institution reference was not resent: cleared by the full-form
  // overwrite, so the record is incomplete again.
  assert!(saved.view.institution_id.is_none());
  assert!(!saved.view.complete);
}

// ─── Catalogs ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn catalogs_are_seeded() {
  let s = store().await;

  let states = s.catalog(Catalog::States).await.unwrap();
  assert_eq!(states.len(), 32);

  let regions = s.catalog(Catalog::Regions).await.unwrap();
  assert!(!regions.is_empty());

  let categories = s.catalog(Catalog::Categories).await.unwrap();
  assert!(!categories.is_empty());

  assert!(s.institutions().await.unwrap().is_empty());
}

// ─── Child records ───────────────────────────────────────────────────────────

#[tokio::test]
async fn child_record_crud_roundtrip() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let created = s
    .create_child_record(
      ChildKind::Achievement,
      id,
      NewChildRecord {
        title:        "Primer lugar".into(),
        description:  "Olimpiada estatal".into(),
        evidence_url: "https://files.test/logros/e.pdf".into(),
      },
    )
    .await
    .unwrap();
  assert!(created.complete);

  let listed = s.child_records(ChildKind::Achievement, id).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].title, "Primer lugar");

  // Other kinds are unaffected.
  assert!(s.child_records(ChildKind::Research, id).await.unwrap().is_empty());

  let evidence = s
    .delete_child_record(ChildKind::Achievement, id, created.id)
    .await
    .unwrap();
  assert_eq!(evidence, "https://files.test/logros/e.pdf");
  assert!(s.child_records(ChildKind::Achievement, id).await.unwrap().is_empty());
}

#[tokio::test]
async fn child_record_delete_checks_ownership() {
  let s = store().await;
  let owner = seed_applicant(&s).await;
  let other = s
    .create_applicant(new_applicant("OTRA000101MDFXXX09", "otra@example.com"))
    .await
    .unwrap()
    .id;

  let record = s
    .create_child_record(
      ChildKind::Experience,
      owner,
      NewChildRecord {
        title:        "Prácticas".into(),
        description:  "Verano".into(),
        evidence_url: "https://files.test/exp/e.pdf".into(),
      },
    )
    .await
    .unwrap();

  let result = s.delete_child_record(ChildKind::Experience, other, record.id).await;
  assert!(matches!(result, Err(Error::RecordNotFound { .. })));

  // Still there for the rightful owner.
  assert_eq!(s.child_records(ChildKind::Experience, owner).await.unwrap().len(), 1);
}

// ─── Skills ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn skill_crud_roundtrip() {
  let s = store().await;
  let id = seed_applicant(&s).await;

  let skill = s
    .create_skill(
      id,
      NewSkill {
        title:       "Rust".into(),
        description: Some("Backend".into()),
        percentage:  80,
      },
    )
    .await
    .unwrap();

  let listed = s.skills(id).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].percentage, 80);

  s.delete_skill(id, skill.id).await.unwrap();
  assert!(s.skills(id).await.unwrap().is_empty());

  let missing = s.delete_skill(id, skill.id).await;
  assert!(matches!(missing, Err(Error::RecordNotFound { .. })));
}
