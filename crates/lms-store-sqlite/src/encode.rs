//! Encoding and decoding helpers between domain types and the text stored in
//! SQLite columns.
//!
//! Documents are compact JSON produced by serde. Timestamps in the
//! `created_at` column use RFC 3339 with a fixed microsecond precision so the
//! column orders correctly as plain text. UUIDs are hyphenated lowercase.

use chrono::{DateTime, SecondsFormat, Utc};
use lms_core::{
  course::{Course, PublicCourse},
  ledger::StudentLedger,
};
use uuid::Uuid;

use crate::Result;

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

/// Fixed width for years 0000-9999 only; `NewCourse::validate` rejects the
/// rest so `created_at` keeps sorting as text.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ─── Documents ───────────────────────────────────────────────────────────────

pub fn encode_course(course: &Course) -> Result<String> {
  Ok(serde_json::to_string(course)?)
}

pub fn decode_course(doc: &str) -> Result<Course> {
  Ok(serde_json::from_str(doc)?)
}

pub fn decode_public_course(doc: &str) -> Result<PublicCourse> {
  decode_course(doc).map(PublicCourse::from)
}

pub fn decode_ledger(doc: &str) -> Result<StudentLedger> {
  Ok(serde_json::from_str(doc)?)
}
