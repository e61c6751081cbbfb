//! The `CourseStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `lms-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  catalog::CourseQuery,
  course::{Course, NewCourse, PublicCourse},
  ledger::{NewPurchase, StudentLedger},
};

/// Abstraction over a course catalog backend.
///
/// Every read is a single query; the only multi-document write is
/// [`CourseStore::record_purchase`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CourseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Courses ───────────────────────────────────────────────────────────

  /// Validate and persist a new course. The id is assigned by the store.
  fn add_course(
    &self,
    input: NewCourse,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + '_;

  /// Retrieve a course by id. Returns `None` if not found.
  fn get_course(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Course>, Self::Error>> + Send + '_;

  /// Return every course matching `query`, ordered by `query.sort_by`.
  fn list_courses<'a>(
    &'a self,
    query: &'a CourseQuery,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + 'a;

  /// Return the public projection of courses flagged `is_public`, most
  /// recently created first, at most `limit` of them (`None` for no cap).
  fn list_public_courses(
    &self,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<PublicCourse>, Self::Error>> + Send + '_;

  // ── Ledgers ───────────────────────────────────────────────────────────

  /// Retrieve the purchase ledger for a student. Returns `None` if the
  /// student has never bought anything.
  fn get_ledger<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<Option<StudentLedger>, Self::Error>> + Send + 'a;

  /// Append a purchase to the student's ledger and a snapshot to the course.
  ///
  /// Returns `None` if the course does not exist. A repeated purchase of the
  /// same course leaves both documents unchanged.
  fn record_purchase(
    &self,
    course_id: Uuid,
    purchase: NewPurchase,
  ) -> impl Future<Output = Result<Option<StudentLedger>, Self::Error>> + Send + '_;
}
