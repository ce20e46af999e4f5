//! SQL schema for the Presea SQLite store.
//!
//! Executed once at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS` and `INSERT OR IGNORE` catalog seeds.
//! Table and column names keep the portal's original Spanish vocabulary —
//! they are part of the wire contract (the frontend posts and reads these
//! names).

/// Full schema DDL plus catalog seeds.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Fixed catalogs ------------------------------------------------------------

CREATE TABLE IF NOT EXISTS estados_republica (
    id_estado     INTEGER PRIMARY KEY,
    nombre_estado TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS region_procedencia (
    id_region_procedencia INTEGER PRIMARY KEY,
    nombre_region         TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS categoria (
    id_categoria     INTEGER PRIMARY KEY,
    nombre_categoria TEXT NOT NULL UNIQUE
);

-- Shared lookup, rows may be created inline during a schooling save.
CREATE TABLE IF NOT EXISTS institucion (
    id_institucion     INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre_institucion TEXT NOT NULL UNIQUE,
    id_estado          INTEGER NOT NULL REFERENCES estados_republica(id_estado),
    tipo_institucion   TEXT NOT NULL CHECK (tipo_institucion IN ('publica', 'privada'))
);

-- Identity ------------------------------------------------------------------

CREATE TABLE IF NOT EXISTS aspirante (
    id_aspirante          INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre                TEXT NOT NULL,
    ap_paterno            TEXT NOT NULL,
    ap_materno            TEXT,
    curp                  TEXT NOT NULL UNIQUE,
    correo_contacto       TEXT NOT NULL UNIQUE,
    password              TEXT NOT NULL,        -- argon2 PHC string
    id_region_procedencia INTEGER NOT NULL REFERENCES region_procedencia(id_region_procedencia),
    id_categoria          INTEGER NOT NULL REFERENCES categoria(id_categoria),
    id_institucion        INTEGER REFERENCES institucion(id_institucion),
    foto_perfil           TEXT                  -- public storage URL
);

-- Singleton child records (at most one row per aspirante) --------------------

CREATE TABLE IF NOT EXISTS redes_sociales (
    id_red_social    INTEGER PRIMARY KEY AUTOINCREMENT,
    id_aspirante     INTEGER NOT NULL REFERENCES aspirante(id_aspirante),
    nombre_red_social TEXT NOT NULL,
    link_red_social  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS perfil_aspirante (
    id_perfil                  INTEGER PRIMARY KEY AUTOINCREMENT,
    id_aspirante               INTEGER NOT NULL UNIQUE REFERENCES aspirante(id_aspirante),
    telefono_contacto          TEXT,
    fecha_nacimiento           TEXT,            -- ISO 8601 date
    correo_personal_opcional   TEXT,
    sexo                       TEXT,
    nacionalidad               TEXT,
    resenia_curricular         TEXT,
    video_postulacion          TEXT,
    evidencia_institucional    TEXT,            -- public storage URLs
    evidencia_identidad        TEXT,
    evidencia_carta_postulacion TEXT,
    id_red_social              INTEGER REFERENCES redes_sociales(id_red_social)
);

CREATE TABLE IF NOT EXISTS escolaridad (
    id_escolaridad     INTEGER PRIMARY KEY AUTOINCREMENT,
    id_aspirante       INTEGER NOT NULL UNIQUE REFERENCES aspirante(id_aspirante),
    id_institucion     INTEGER REFERENCES institucion(id_institucion),
    nivel_estudios     TEXT,
    titulo_obtenido    TEXT,
    estado_grado       TEXT,
    cedula_profesional TEXT,
    fecha_emision      TEXT,                    -- ISO 8601 date
    constancia_url     TEXT,
    titulo_file_url    TEXT,
    cedula_file_url    TEXT
);

-- Repeatable child records ---------------------------------------------------

CREATE TABLE IF NOT EXISTS logros_aspirante (
    id_logro          INTEGER PRIMARY KEY AUTOINCREMENT,
    id_aspirante      INTEGER NOT NULL REFERENCES aspirante(id_aspirante),
    titulo_logro      TEXT NOT NULL,
    descripcion_logro TEXT NOT NULL,
    evidencia_logro   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS actividad_extra_stem (
    id_academica_stem                INTEGER PRIMARY KEY AUTOINCREMENT,
    id_aspirante                     INTEGER NOT NULL REFERENCES aspirante(id_aspirante),
    titulo_actividad_extra_stem      TEXT NOT NULL,
    descripcion_actividad_extra_stem TEXT NOT NULL,
    evidencia_actividad_extra_stem   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS investigacion_stem (
    id_investigacion_stem          INTEGER PRIMARY KEY AUTOINCREMENT,
    id_aspirante                   INTEGER NOT NULL REFERENCES aspirante(id_aspirante),
    titulo_investigacion_stem      TEXT NOT NULL,
    descripcion_investigacion_stem TEXT NOT NULL,
    evidencia_investigacion_stem   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS experiencia_laboral (
    id_experiencia_laboral          INTEGER PRIMARY KEY AUTOINCREMENT,
    id_aspirante                    INTEGER NOT NULL REFERENCES aspirante(id_aspirante),
    titulo_experiencia_laboral      TEXT NOT NULL,
    descripcion_experiencia_laboral TEXT NOT NULL,
    evidencia_experiencia_laboral   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS habilidades (
    id_habilidades_academicas INTEGER PRIMARY KEY AUTOINCREMENT,
    id_aspirante              INTEGER NOT NULL REFERENCES aspirante(id_aspirante),
    titulo_habilidad          TEXT NOT NULL,
    descripcion_habilidad     TEXT,
    porcentaje_habilidad      INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS redes_aspirante_idx       ON redes_sociales(id_aspirante);
CREATE INDEX IF NOT EXISTS logros_aspirante_idx      ON logros_aspirante(id_aspirante);
CREATE INDEX IF NOT EXISTS actividad_aspirante_idx   ON actividad_extra_stem(id_aspirante);
CREATE INDEX IF NOT EXISTS invest_aspirante_idx      ON investigacion_stem(id_aspirante);
CREATE INDEX IF NOT EXISTS experiencia_aspirante_idx ON experiencia_laboral(id_aspirante);
CREATE INDEX IF NOT EXISTS habilidades_aspirante_idx ON habilidades(id_aspirante);

-- Catalog seeds ---------------------------------------------------------------

INSERT OR IGNORE INTO estados_republica (id_estado, nombre_estado) VALUES
    (1, 'Aguascalientes'), (2, 'Baja California'), (3, 'Baja California Sur'),
    (4, 'Campeche'), (5, 'Chiapas'), (6, 'Chihuahua'), (7, 'Ciudad de México'),
    (8, 'Coahuila'), (9, 'Colima'), (10, 'Durango'), (11, 'Estado de México'),
    (12, 'Guanajuato'), (13, 'Guerrero'), (14, 'Hidalgo'), (15, 'Jalisco'),
    (16, 'Michoacán'), (17, 'Morelos'), (18, 'Nayarit'), (19, 'Nuevo León'),
    (20, 'Oaxaca'), (21, 'Puebla'), (22, 'Querétaro'), (23, 'Quintana Roo'),
    (24, 'San Luis Potosí'), (25, 'Sinaloa'), (26, 'Sonora'), (27, 'Tabasco'),
    (28, 'Tamaulipas'), (29, 'Tlaxcala'), (30, 'Veracruz'), (31, 'Yucatán'),
    (32, 'Zacatecas');

INSERT OR IGNORE INTO region_procedencia (id_region_procedencia, nombre_region) VALUES
    (1, 'Norte'), (2, 'Centro'), (3, 'Occidente'), (4, 'Sur'), (5, 'Sureste');

INSERT OR IGNORE INTO categoria (id_categoria, nombre_categoria) VALUES
    (1, 'Estudiante'), (2, 'Egresada'), (3, 'Profesionista'), (4, 'Investigadora');
";
