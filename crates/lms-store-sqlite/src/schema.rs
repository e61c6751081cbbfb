//! SQL schema for the course catalog SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One JSON document per course. `created_at` mirrors `$.date` in a
-- fixed-width format so it sorts lexically.
CREATE TABLE IF NOT EXISTS courses (
    course_id   TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    doc         TEXT NOT NULL
);

-- One purchase ledger per student.
CREATE TABLE IF NOT EXISTS ledgers (
    student_id  TEXT PRIMARY KEY,
    doc         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS courses_created_idx  ON courses(created_at);
CREATE INDEX IF NOT EXISTS courses_category_idx ON courses(json_extract(doc, '$.category'));
CREATE INDEX IF NOT EXISTS courses_public_idx   ON courses(json_extract(doc, '$.isPublic'));

PRAGMA user_version = 1;
";
