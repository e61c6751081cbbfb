//! Error types for `lms-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown course level: {0:?}")]
  UnknownLevel(String),

  #[error("course title must not be empty")]
  EmptyTitle,

  #[error("course pricing must be a non-negative number, got {0}")]
  InvalidPricing(f64),

  #[error("course date must fall in years 0000-9999, got year {0}")]
  DateOutOfRange(i32),

  #[error("student id must not be empty")]
  EmptyStudentId,

  #[error("paid amount must be a non-negative number, got {0}")]
  InvalidPaidAmount(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
