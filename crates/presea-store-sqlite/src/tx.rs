//! Synchronous bodies of the store operations.
//!
//! Everything here runs on the store's background connection thread inside
//! `tokio_rusqlite::Connection::call`. Upserts take `&mut Connection` and
//! wrap their whole read-merge-write sequence in one transaction; a
//! dropped (uncommitted) transaction rolls back, so any early `return
//! Err(...)` aborts cleanly.
//!
//! Column lists are static SQL text per record kind. Nothing here derives
//! SQL from caller-supplied keys.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension as _};

use presea_core::{
  applicant::{Applicant, NewApplicant},
  catalog::{Catalog, CatalogEntry},
  profile::{infer_social_name, Profile, ProfileDraft, ProfileSaved, ProfileView, SocialLink},
  record::{ChildKind, ChildRecord, NewChildRecord, NewSkill, Skill},
  schooling::{
    Institution, InstitutionKind, Schooling, SchoolingDraft, SchoolingSaved, SchoolingView,
  },
  Error, Result,
};

// ─── Error and encoding helpers ──────────────────────────────────────────────

pub(crate) fn db(e: rusqlite::Error) -> Error {
  Error::Store(Box::new(e))
}

fn unique_violation(e: &rusqlite::Error) -> bool {
  match e {
    rusqlite::Error::SqliteFailure(f, msg) => {
      f.code == rusqlite::ErrorCode::ConstraintViolation
        && msg.as_deref().is_some_and(|m| m.contains("UNIQUE"))
    }
    _ => false,
  }
}

fn encode_date(d: Option<NaiveDate>) -> Option<String> {
  d.map(|d| d.format("%Y-%m-%d").to_string())
}

fn decode_date(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.map(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d"))
    .transpose()
    .map_err(|e| Error::Store(Box::new(e)))
}

/// File-slot merge: a fresh upload replaces the field and schedules the
/// differing prior URL for post-commit deletion; no upload keeps the
/// prior value untouched.
fn merge_slot(
  fresh:      Option<String>,
  current:    Option<String>,
  superseded: &mut Vec<String>,
) -> Option<String> {
  match fresh {
    Some(url) => {
      if let Some(old) = current {
        if !old.is_empty() && old != url {
          superseded.push(old);
        }
      }
      Some(url)
    }
    None => current,
  }
}

/// Blank strings from form fields are stored as NULL.
fn blank_to_null(v: Option<String>) -> Option<String> {
  v.filter(|s| !s.trim().is_empty())
}

// ─── Applicants ──────────────────────────────────────────────────────────────

const APPLICANT_COLS: &str =
  "id_aspirante, nombre, ap_paterno, ap_materno, curp, correo_contacto, foto_perfil";

fn applicant_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Applicant> {
  Ok(Applicant {
    id:               row.get(0)?,
    first_name:       row.get(1)?,
    paternal_surname: row.get(2)?,
    maternal_surname: row.get(3)?,
    curp:             row.get(4)?,
    email:            row.get(5)?,
    photo_url:        row.get(6)?,
  })
}

pub fn load_applicant(conn: &Connection, id: i64) -> Result<Option<Applicant>> {
  conn
    .query_row(
      &format!("SELECT {APPLICANT_COLS} FROM aspirante WHERE id_aspirante = ?1"),
      params![id],
      applicant_from_row,
    )
    .optional()
    .map_err(db)
}

pub fn applicant_by_email(
  conn:  &Connection,
  email: &str,
) -> Result<Option<(Applicant, String)>> {
  conn
    .query_row(
      &format!("SELECT {APPLICANT_COLS}, password FROM aspirante WHERE correo_contacto = ?1"),
      params![email],
      |row| Ok((applicant_from_row(row)?, row.get::<_, String>(7)?)),
    )
    .optional()
    .map_err(db)
}

pub fn create_applicant(conn: &Connection, input: NewApplicant) -> Result<Applicant> {
  let insert = conn.execute(
    "INSERT INTO aspirante (
       nombre, ap_paterno, ap_materno, curp, correo_contacto, password,
       id_region_procedencia, id_categoria, id_institucion, foto_perfil
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    params![
      input.first_name,
      input.paternal_surname,
      blank_to_null(input.maternal_surname),
      input.curp,
      input.email,
      input.password_hash,
      input.region_id,
      input.category_id,
      input.institution_id,
      input.photo_url,
    ],
  );

  match insert {
    Ok(_) => {}
    Err(e) if unique_violation(&e) => return Err(Error::IdentityTaken),
    Err(e) => return Err(db(e)),
  }

  let id = conn.last_insert_rowid();
  load_applicant(conn, id)?.ok_or(Error::ApplicantNotFound(id))
}

// ─── Profile ─────────────────────────────────────────────────────────────────

struct RawProfile {
  id:                     i64,
  applicant_id:           i64,
  phone:                  Option<String>,
  birth_date:             Option<String>,
  personal_email:         Option<String>,
  sex:                    Option<String>,
  nationality:            Option<String>,
  bio:                    Option<String>,
  video_url:              Option<String>,
  institutional_evidence: Option<String>,
  identity_evidence:      Option<String>,
  application_letter:     Option<String>,
  social_link_id:         Option<i64>,
}

impl RawProfile {
  fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      id:                     self.id,
      applicant_id:           self.applicant_id,
      phone:                  self.phone,
      birth_date:             decode_date(self.birth_date)?,
      personal_email:         self.personal_email,
      sex:                    self.sex,
      nationality:            self.nationality,
      bio:                    self.bio,
      video_url:              self.video_url,
      institutional_evidence: self.institutional_evidence,
      identity_evidence:      self.identity_evidence,
      application_letter:     self.application_letter,
      social_link_id:         self.social_link_id,
    })
  }
}

fn load_profile(conn: &Connection, applicant_id: i64) -> Result<Option<Profile>> {
  let raw = conn
    .query_row(
      "SELECT id_perfil, id_aspirante, telefono_contacto, fecha_nacimiento,
              correo_personal_opcional, sexo, nacionalidad, resenia_curricular,
              video_postulacion, evidencia_institucional, evidencia_identidad,
              evidencia_carta_postulacion, id_red_social
         FROM perfil_aspirante WHERE id_aspirante = ?1",
      params![applicant_id],
      |row| {
        Ok(RawProfile {
          id:                     row.get(0)?,
          applicant_id:           row.get(1)?,
          phone:                  row.get(2)?,
          birth_date:             row.get(3)?,
          personal_email:         row.get(4)?,
          sex:                    row.get(5)?,
          nationality:            row.get(6)?,
          bio:                    row.get(7)?,
          video_url:              row.get(8)?,
          institutional_evidence: row.get(9)?,
          identity_evidence:      row.get(10)?,
          application_letter:     row.get(11)?,
          social_link_id:         row.get(12)?,
        })
      },
    )
    .optional()
    .map_err(db)?;

  raw.map(RawProfile::into_profile).transpose()
}

fn load_social(conn: &Connection, id: i64) -> Result<Option<SocialLink>> {
  conn
    .query_row(
      "SELECT id_red_social, id_aspirante, nombre_red_social, link_red_social
         FROM redes_sociales WHERE id_red_social = ?1",
      params![id],
      |row| {
        Ok(SocialLink {
          id:           row.get(0)?,
          applicant_id: row.get(1)?,
          name:         row.get(2)?,
          url:          row.get(3)?,
        })
      },
    )
    .optional()
    .map_err(db)
}

pub fn profile_view(conn: &Connection, applicant_id: i64) -> Result<Option<ProfileView>> {
  let Some(applicant) = load_applicant(conn, applicant_id)? else {
    return Ok(None);
  };
  let profile = load_profile(conn, applicant_id)?;
  let social = match profile.as_ref().and_then(|p| p.social_link_id) {
    Some(id) => load_social(conn, id)?,
    None => None,
  };
  Ok(Some(ProfileView::assemble(applicant, profile, social)))
}

/// Upsert an applicant's social link by URL: reuse (and refresh the name
/// of) an existing row with the same URL, insert otherwise.
fn upsert_social_link(
  conn:         &Connection,
  applicant_id: i64,
  url:          &str,
) -> Result<i64> {
  let name = infer_social_name(url);

  let existing: Option<i64> = conn
    .query_row(
      "SELECT id_red_social FROM redes_sociales
        WHERE id_aspirante = ?1 AND link_red_social = ?2",
      params![applicant_id, url],
      |row| row.get(0),
    )
    .optional()
    .map_err(db)?;

  match existing {
    Some(id) => {
      conn
        .execute(
          "UPDATE redes_sociales SET nombre_red_social = ?1 WHERE id_red_social = ?2",
          params![name, id],
        )
        .map_err(db)?;
      Ok(id)
    }
    None => {
      conn
        .execute(
          "INSERT INTO redes_sociales (id_aspirante, nombre_red_social, link_red_social)
           VALUES (?1, ?2, ?3)",
          params![applicant_id, name, url],
        )
        .map_err(db)?;
      Ok(conn.last_insert_rowid())
    }
  }
}

pub fn upsert_profile(
  conn:         &mut Connection,
  applicant_id: i64,
  draft:        ProfileDraft,
) -> Result<ProfileSaved> {
  let tx = conn.transaction().map_err(db)?;

  let applicant = load_applicant(&tx, applicant_id)?
    .ok_or(Error::ApplicantNotFound(applicant_id))?;
  let current = load_profile(&tx, applicant_id)?;
  let created = current.is_none();

  let social_fk = match draft.social_url.as_deref().map(str::trim) {
    Some(url) if !url.is_empty() => Some(upsert_social_link(&tx, applicant_id, url)?),
    _ => None,
  };

  let mut superseded = Vec::new();
  let cur = current.unwrap_or_default();
  let institutional =
    merge_slot(draft.institutional_evidence_url, cur.institutional_evidence, &mut superseded);
  let identity = merge_slot(draft.identity_evidence_url, cur.identity_evidence, &mut superseded);
  let letter = merge_slot(draft.application_letter_url, cur.application_letter, &mut superseded);

  // The photo lives on aspirante, not on the profile row.
  if let Some(photo) = draft.photo_url.as_deref() {
    if let Some(old) = applicant.photo_url.as_deref() {
      if !old.is_empty() && old != photo {
        superseded.push(old.to_string());
      }
    }
    tx.execute(
      "UPDATE aspirante SET foto_perfil = ?1 WHERE id_aspirante = ?2",
      params![photo, applicant_id],
    )
    .map_err(db)?;
  }

  let birth_date = encode_date(draft.birth_date);
  let phone = blank_to_null(draft.phone);
  let personal_email = blank_to_null(draft.personal_email);
  let sex = blank_to_null(draft.sex);
  let nationality = blank_to_null(draft.nationality);
  let bio = blank_to_null(draft.bio);
  let video_url = blank_to_null(draft.video_url);

  if created {
    tx.execute(
      "INSERT INTO perfil_aspirante (
         id_aspirante, telefono_contacto, fecha_nacimiento,
         correo_personal_opcional, sexo, nacionalidad, resenia_curricular,
         video_postulacion, evidencia_institucional, evidencia_identidad,
         evidencia_carta_postulacion, id_red_social
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
      params![
        applicant_id,
        phone,
        birth_date,
        personal_email,
        sex,
        nationality,
        bio,
        video_url,
        institutional,
        identity,
        letter,
        social_fk,
      ],
    )
    .map_err(db)?;
  } else {
    tx.execute(
      "UPDATE perfil_aspirante SET
         telefono_contacto = ?1, fecha_nacimiento = ?2,
         correo_personal_opcional = ?3, sexo = ?4, nacionalidad = ?5,
         resenia_curricular = ?6, video_postulacion = ?7,
         evidencia_institucional = ?8, evidencia_identidad = ?9,
         evidencia_carta_postulacion = ?10, id_red_social = ?11
       WHERE id_aspirante = ?12",
      params![
        phone,
        birth_date,
        personal_email,
        sex,
        nationality,
        bio,
        video_url,
        institutional,
        identity,
        letter,
        social_fk,
        applicant_id,
      ],
    )
    .map_err(db)?;
  }

  tx.commit().map_err(db)?;

  // Re-read the committed state; completeness is recomputed on the way out.
  let view = profile_view(conn, applicant_id)?
    .ok_or(Error::ApplicantNotFound(applicant_id))?;
  Ok(ProfileSaved { view, superseded, created })
}

// ─── Schooling ───────────────────────────────────────────────────────────────

struct RawSchooling {
  id:               i64,
  applicant_id:     i64,
  institution_id:   Option<i64>,
  level:            Option<String>,
  degree_title:     Option<String>,
  degree_status:    Option<String>,
  license_number:   Option<String>,
  issue_date:       Option<String>,
  study_proof:      Option<String>,
  degree_file:      Option<String>,
  license_file:     Option<String>,
  institution_name: Option<String>,
}

impl RawSchooling {
  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      applicant_id:     row.get(1)?,
      institution_id:   row.get(2)?,
      level:            row.get(3)?,
      degree_title:     row.get(4)?,
      degree_status:    row.get(5)?,
      license_number:   row.get(6)?,
      issue_date:       row.get(7)?,
      study_proof:      row.get(8)?,
      degree_file:      row.get(9)?,
      license_file:     row.get(10)?,
      institution_name: row.get(11)?,
    })
  }

  fn into_view(self) -> Result<SchoolingView> {
    let schooling = Schooling {
      id:             self.id,
      applicant_id:   self.applicant_id,
      institution_id: self.institution_id,
      level:          self.level,
      degree_title:   self.degree_title,
      degree_status:  self.degree_status,
      license_number: self.license_number,
      issue_date:     decode_date(self.issue_date)?,
      study_proof:    self.study_proof,
      degree_file:    self.degree_file,
      license_file:   self.license_file,
    };
    Ok(SchoolingView::assemble(schooling, self.institution_name))
  }
}

const SCHOOLING_SELECT: &str =
  "SELECT es.id_escolaridad, es.id_aspirante, es.id_institucion,
          es.nivel_estudios, es.titulo_obtenido, es.estado_grado,
          es.cedula_profesional, es.fecha_emision, es.constancia_url,
          es.titulo_file_url, es.cedula_file_url, i.nombre_institucion
     FROM escolaridad es
     LEFT JOIN institucion i ON i.id_institucion = es.id_institucion
    WHERE es.id_aspirante = ?1";

pub fn schooling_view(conn: &Connection, applicant_id: i64) -> Result<Option<SchoolingView>> {
  let raw = conn
    .query_row(SCHOOLING_SELECT, params![applicant_id], RawSchooling::from_row)
    .optional()
    .map_err(db)?;
  raw.map(RawSchooling::into_view).transpose()
}

/// Insert an inline institution. Runs inside the caller's transaction so a
/// later failure rolls the new row back too.
fn insert_institution(
  conn:     &Connection,
  name:     &str,
  state_id: Option<i64>,
  kind:     Option<InstitutionKind>,
) -> Result<i64> {
  let state_id = state_id.ok_or(Error::MissingField("newInstitutionStateId"))?;
  let kind = kind.ok_or(Error::MissingField("newInstitutionType"))?;

  let insert = conn.execute(
    "INSERT INTO institucion (nombre_institucion, id_estado, tipo_institucion)
     VALUES (?1, ?2, ?3)",
    params![name, state_id, kind.as_str()],
  );

  match insert {
    Ok(_) => Ok(conn.last_insert_rowid()),
    Err(e) if unique_violation(&e) => Err(Error::InstitutionExists(name.to_string())),
    Err(e) => Err(db(e)),
  }
}

pub fn upsert_schooling(
  conn:         &mut Connection,
  applicant_id: i64,
  draft:        SchoolingDraft,
) -> Result<SchoolingSaved> {
  let tx = conn.transaction().map_err(db)?;

  // Inline institution creation comes first; any later failure in this
  // transaction must roll it back.
  let institution_fk = match &draft.new_institution {
    Some(ni) if !ni.name.trim().is_empty() => {
      Some(insert_institution(&tx, ni.name.trim(), ni.state_id, ni.kind)?)
    }
    _ => draft.institution_id,
  };

  if load_applicant(&tx, applicant_id)?.is_none() {
    return Err(Error::ApplicantNotFound(applicant_id));
  }

  let current = tx
    .query_row(SCHOOLING_SELECT, params![applicant_id], RawSchooling::from_row)
    .optional()
    .map_err(db)?;
  let created = current.is_none();

  let mut superseded = Vec::new();
  let (cur_study, cur_degree, cur_license) = current
    .map(|c| (c.study_proof, c.degree_file, c.license_file))
    .unwrap_or_default();
  let study_proof = merge_slot(draft.study_proof_url, cur_study, &mut superseded);
  let degree_file = merge_slot(draft.degree_file_url, cur_degree, &mut superseded);
  let license_file = merge_slot(draft.license_file_url, cur_license, &mut superseded);

  let issue_date = encode_date(draft.issue_date);
  let level = blank_to_null(draft.level);
  let degree_title = blank_to_null(draft.degree_title);
  let degree_status = blank_to_null(draft.degree_status);
  let license_number = blank_to_null(draft.license_number);

  if created {
    tx.execute(
      "INSERT INTO escolaridad (
         id_aspirante, id_institucion, nivel_estudios, titulo_obtenido,
         estado_grado, cedula_profesional, fecha_emision, constancia_url,
         titulo_file_url, cedula_file_url
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
      params![
        applicant_id,
        institution_fk,
        level,
        degree_title,
        degree_status,
        license_number,
        issue_date,
        study_proof,
        degree_file,
        license_file,
      ],
    )
    .map_err(db)?;
  } else {
    tx.execute(
      "UPDATE escolaridad SET
         id_institucion = ?1, nivel_estudios = ?2, titulo_obtenido = ?3,
         estado_grado = ?4, cedula_profesional = ?5, fecha_emision = ?6,
         constancia_url = ?7, titulo_file_url = ?8, cedula_file_url = ?9
       WHERE id_aspirante = ?10",
      params![
        institution_fk,
        level,
        degree_title,
        degree_status,
        license_number,
        issue_date,
        study_proof,
        degree_file,
        license_file,
        applicant_id,
      ],
    )
    .map_err(db)?;
  }

  tx.commit().map_err(db)?;

  let view = schooling_view(conn, applicant_id)?.ok_or(Error::RecordNotFound {
    kind: "escolaridad",
    id:   applicant_id,
  })?;
  Ok(SchoolingSaved { view, superseded, created })
}

// ─── Catalogs ────────────────────────────────────────────────────────────────

pub fn institutions(conn: &Connection) -> Result<Vec<Institution>> {
  let mut stmt = conn
    .prepare(
      "SELECT id_institucion, nombre_institucion, id_estado, tipo_institucion
         FROM institucion ORDER BY nombre_institucion ASC",
    )
    .map_err(db)?;

  let rows = stmt
    .query_map([], |row| {
      Ok((
        row.get::<_, i64>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, i64>(2)?,
        row.get::<_, String>(3)?,
      ))
    })
    .map_err(db)?
    .collect::<rusqlite::Result<Vec<_>>>()
    .map_err(db)?;

  rows
    .into_iter()
    .map(|(id, name, state_id, kind)| {
      let kind = InstitutionKind::parse(&kind).ok_or_else(|| {
        Error::Store(format!("unknown tipo_institucion: {kind:?}").into())
      })?;
      Ok(Institution { id, name, state_id, kind })
    })
    .collect()
}

pub fn catalog(conn: &Connection, which: Catalog) -> Result<Vec<CatalogEntry>> {
  let sql = match which {
    Catalog::States => {
      "SELECT id_estado, nombre_estado FROM estados_republica ORDER BY nombre_estado ASC"
    }
    Catalog::Regions => {
      "SELECT id_region_procedencia, nombre_region FROM region_procedencia ORDER BY nombre_region ASC"
    }
    Catalog::Categories => {
      "SELECT id_categoria, nombre_categoria FROM categoria ORDER BY nombre_categoria ASC"
    }
  };

  let mut stmt = conn.prepare(sql).map_err(db)?;
  let rows = stmt
    .query_map([], |row| {
      Ok(CatalogEntry { id: row.get(0)?, name: row.get(1)? })
    })
    .map_err(db)?
    .collect::<rusqlite::Result<Vec<_>>>()
    .map_err(db)?;
  Ok(rows)
}

// ─── Repeatable child records ────────────────────────────────────────────────

/// Static table descriptor for one child-record kind.
struct ChildTable {
  table:        &'static str,
  id_col:       &'static str,
  title_col:    &'static str,
  desc_col:     &'static str,
  evidence_col: &'static str,
}

const fn child_table(kind: ChildKind) -> ChildTable {
  match kind {
    ChildKind::Achievement => ChildTable {
      table:        "logros_aspirante",
      id_col:       "id_logro",
      title_col:    "titulo_logro",
      desc_col:     "descripcion_logro",
      evidence_col: "evidencia_logro",
    },
    ChildKind::Activity => ChildTable {
      table:        "actividad_extra_stem",
      id_col:       "id_academica_stem",
      title_col:    "titulo_actividad_extra_stem",
      desc_col:     "descripcion_actividad_extra_stem",
      evidence_col: "evidencia_actividad_extra_stem",
    },
    ChildKind::Research => ChildTable {
      table:        "investigacion_stem",
      id_col:       "id_investigacion_stem",
      title_col:    "titulo_investigacion_stem",
      desc_col:     "descripcion_investigacion_stem",
      evidence_col: "evidencia_investigacion_stem",
    },
    ChildKind::Experience => ChildTable {
      table:        "experiencia_laboral",
      id_col:       "id_experiencia_laboral",
      title_col:    "titulo_experiencia_laboral",
      desc_col:     "descripcion_experiencia_laboral",
      evidence_col: "evidencia_experiencia_laboral",
    },
  }
}

pub fn child_records(
  conn:         &Connection,
  kind:         ChildKind,
  applicant_id: i64,
) -> Result<Vec<ChildRecord>> {
  let t = child_table(kind);
  let sql = format!(
    "SELECT {id}, {title}, {desc}, {evidence} FROM {table}
      WHERE id_aspirante = ?1 ORDER BY {id} ASC",
    id = t.id_col,
    title = t.title_col,
    desc = t.desc_col,
    evidence = t.evidence_col,
    table = t.table,
  );

  let mut stmt = conn.prepare(&sql).map_err(db)?;
  let rows = stmt
    .query_map(params![applicant_id], |row| {
      Ok(ChildRecord::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    })
    .map_err(db)?
    .collect::<rusqlite::Result<Vec<_>>>()
    .map_err(db)?;
  Ok(rows)
}

pub fn create_child_record(
  conn:         &Connection,
  kind:         ChildKind,
  applicant_id: i64,
  input:        NewChildRecord,
) -> Result<ChildRecord> {
  let t = child_table(kind);
  let sql = format!(
    "INSERT INTO {table} (id_aspirante, {title}, {desc}, {evidence})
     VALUES (?1, ?2, ?3, ?4)",
    table = t.table,
    title = t.title_col,
    desc = t.desc_col,
    evidence = t.evidence_col,
  );

  conn
    .execute(&sql, params![applicant_id, input.title, input.description, input.evidence_url])
    .map_err(db)?;

  let id = conn.last_insert_rowid();
  Ok(ChildRecord::new(id, input.title, input.description, input.evidence_url))
}

/// Delete a child record and return its evidence URL for post-commit
/// storage cleanup. The row must belong to `applicant_id`.
pub fn delete_child_record(
  conn:         &mut Connection,
  kind:         ChildKind,
  applicant_id: i64,
  record_id:    i64,
) -> Result<String> {
  let t = child_table(kind);
  let tx = conn.transaction().map_err(db)?;

  let select = format!(
    "SELECT {evidence} FROM {table} WHERE {id} = ?1 AND id_aspirante = ?2",
    evidence = t.evidence_col,
    table = t.table,
    id = t.id_col,
  );
  let evidence_url: Option<String> = tx
    .query_row(&select, params![record_id, applicant_id], |row| row.get(0))
    .optional()
    .map_err(db)?;

  let Some(evidence_url) = evidence_url else {
    return Err(Error::RecordNotFound { kind: kind.label(), id: record_id });
  };

  let delete = format!(
    "DELETE FROM {table} WHERE {id} = ?1 AND id_aspirante = ?2",
    table = t.table,
    id = t.id_col,
  );
  tx.execute(&delete, params![record_id, applicant_id]).map_err(db)?;
  tx.commit().map_err(db)?;

  Ok(evidence_url)
}

// ─── Skills ──────────────────────────────────────────────────────────────────

pub fn skills(conn: &Connection, applicant_id: i64) -> Result<Vec<Skill>> {
  let mut stmt = conn
    .prepare(
      "SELECT id_habilidades_academicas, titulo_habilidad, descripcion_habilidad,
              porcentaje_habilidad
         FROM habilidades WHERE id_aspirante = ?1
        ORDER BY id_habilidades_academicas ASC",
    )
    .map_err(db)?;

  let rows = stmt
    .query_map(params![applicant_id], |row| {
      Ok(Skill {
        id:          row.get(0)?,
        title:       row.get(1)?,
        description: row.get(2)?,
        percentage:  row.get(3)?,
      })
    })
    .map_err(db)?
    .collect::<rusqlite::Result<Vec<_>>>()
    .map_err(db)?;
  Ok(rows)
}

pub fn create_skill(
  conn:         &Connection,
  applicant_id: i64,
  input:        NewSkill,
) -> Result<Skill> {
  conn
    .execute(
      "INSERT INTO habilidades (id_aspirante, titulo_habilidad, descripcion_habilidad,
                                porcentaje_habilidad)
       VALUES (?1, ?2, ?3, ?4)",
      params![applicant_id, input.title, input.description, input.percentage],
    )
    .map_err(db)?;

  Ok(Skill {
    id:          conn.last_insert_rowid(),
    title:       input.title,
    description: input.description,
    percentage:  input.percentage,
  })
}

pub fn delete_skill(conn: &Connection, applicant_id: i64, skill_id: i64) -> Result<()> {
  let affected = conn
    .execute(
      "DELETE FROM habilidades
        WHERE id_habilidades_academicas = ?1 AND id_aspirante = ?2",
      params![skill_id, applicant_id],
    )
    .map_err(db)?;

  if affected == 0 {
    return Err(Error::RecordNotFound { kind: "habilidad", id: skill_id });
  }
  Ok(())
}
