//! [`SqliteStore`] — the SQLite implementation of [`CourseStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use lms_core::{
  catalog::CourseQuery,
  course::{Course, NewCourse, PublicCourse, StudentSnapshot},
  ledger::{NewPurchase, StudentLedger},
  store::CourseStore,
};

use crate::{
  encode::{
    decode_course, decode_ledger, decode_public_course, encode_course,
    encode_dt, encode_uuid,
  },
  query::{CatalogSql, catalog_sql},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A course catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a statement that yields a single `doc` column per row.
  async fn select_docs(&self, stmt: CatalogSql) -> Result<Vec<String>> {
    let docs = self
      .conn
      .call(move |conn| {
        let mut prepared = conn.prepare(&stmt.sql)?;
        let rows = prepared
          .query_map(rusqlite::params_from_iter(stmt.params.iter()), |row| {
            row.get::<_, String>(0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(docs)
  }
}

// ─── CourseStore impl ────────────────────────────────────────────────────────

impl CourseStore for SqliteStore {
  type Error = Error;

  // ── Courses ───────────────────────────────────────────────────────────────

  async fn add_course(&self, input: NewCourse) -> Result<Course> {
    input.validate()?;
    let course = input.into_course(Uuid::new_v4(), Utc::now());

    let id_str = encode_uuid(course.course_id);
    let at_str = encode_dt(course.date);
    let doc    = encode_course(&course)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO courses (course_id, created_at, doc) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, at_str, doc],
        )?;
        Ok(())
      })
      .await?;

    Ok(course)
  }

  async fn get_course(&self, id: Uuid) -> Result<Option<Course>> {
    let id_str = encode_uuid(id);

    let doc: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT doc FROM courses WHERE course_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    doc.as_deref().map(decode_course).transpose()
  }

  async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
    let docs = self.select_docs(catalog_sql(query)).await?;
    docs.iter().map(|d| decode_course(d)).collect()
  }

  async fn list_public_courses(
    &self,
    limit: Option<usize>,
  ) -> Result<Vec<PublicCourse>> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val = limit
      .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
      .unwrap_or(-1);

    let docs: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT doc FROM courses
           WHERE json_extract(doc, '$.isPublic') = 1
           ORDER BY created_at DESC, rowid DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    docs.iter().map(|d| decode_public_course(d)).collect()
  }

  // ── Ledgers ───────────────────────────────────────────────────────────────

  async fn get_ledger(&self, student_id: &str) -> Result<Option<StudentLedger>> {
    let student_id = student_id.to_owned();

    let doc: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT doc FROM ledgers WHERE student_id = ?1",
            rusqlite::params![student_id],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    doc.as_deref().map(decode_ledger).transpose()
  }

  async fn record_purchase(
    &self,
    course_id: Uuid,
    purchase:  NewPurchase,
  ) -> Result<Option<StudentLedger>> {
    purchase.validate()?;

    let course_id_str = encode_uuid(course_id);
    let entry_json    = serde_json::to_string(&purchase.entry(&course_id_str))?;
    let snapshot_json = serde_json::to_string(&StudentSnapshot {
      student_id:    purchase.student_id.clone(),
      student_name:  purchase.student_name,
      student_email: purchase.student_email,
      paid_amount:   purchase.paid_amount,
    })?;
    let student_id    = purchase.student_id;

    let doc: Option<String> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let course_exists = tx
          .query_row(
            "SELECT 1 FROM courses WHERE course_id = ?1",
            rusqlite::params![course_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !course_exists {
          return Ok(None);
        }

        let already_bought: bool = tx.query_row(
          "SELECT EXISTS (
             SELECT 1
             FROM ledgers l, json_each(l.doc, '$.courses') e
             WHERE l.student_id = ?1
               AND json_extract(e.value, '$.courseId') = ?2
           )",
          rusqlite::params![student_id, course_id_str],
          |row| row.get(0),
        )?;

        if !already_bought {
          tx.execute(
            "INSERT INTO ledgers (student_id, doc)
             VALUES (?1, json_object('studentId', ?1, 'courses', json_array(json(?2))))
             ON CONFLICT (student_id)
             DO UPDATE SET doc = json_insert(doc, '$.courses[#]', json(?2))",
            rusqlite::params![student_id, entry_json],
          )?;
          tx.execute(
            "UPDATE courses
             SET doc = json_insert(doc, '$.students[#]', json(?2))
             WHERE course_id = ?1",
            rusqlite::params![course_id_str, snapshot_json],
          )?;
        }

        let doc: String = tx.query_row(
          "SELECT doc FROM ledgers WHERE student_id = ?1",
          rusqlite::params![student_id],
          |row| row.get(0),
        )?;

        tx.commit()?;
        Ok(Some(doc))
      })
      .await?;

    doc.as_deref().map(decode_ledger).transpose()
  }
}
