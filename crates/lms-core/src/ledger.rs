//! Student purchase ledgers.
//!
//! One ledger exists per student id. It is created on the first purchase and
//! appended to afterwards; entries are never removed.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single purchase recorded in a student's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEntry {
  /// The course id exactly as it was recorded.
  pub course_id:     String,
  pub student_name:  String,
  pub student_email: String,
  pub paid_amount:   f64,
}

/// All purchases made by one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLedger {
  pub student_id: String,
  #[serde(default)]
  pub courses:    Vec<PurchaseEntry>,
}

impl StudentLedger {
  /// `true` if any entry references `course_id` (exact string match).
  pub fn has_purchased(&self, course_id: &str) -> bool {
    self.courses.iter().any(|entry| entry.course_id == course_id)
  }
}

/// Purchase check over an optional ledger: a student with no ledger has not
/// bought anything.
pub fn has_purchased(ledger: Option<&StudentLedger>, course_id: &str) -> bool {
  ledger.is_some_and(|l| l.has_purchased(course_id))
}

/// Input to [`crate::store::CourseStore::record_purchase`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
  pub student_id:    String,
  #[serde(default)]
  pub student_name:  String,
  #[serde(default)]
  pub student_email: String,
  pub paid_amount:   f64,
}

impl NewPurchase {
  pub fn validate(&self) -> Result<()> {
    if self.student_id.trim().is_empty() {
      return Err(Error::EmptyStudentId);
    }
    if !self.paid_amount.is_finite() || self.paid_amount < 0.0 {
      return Err(Error::InvalidPaidAmount(self.paid_amount));
    }
    Ok(())
  }

  /// The ledger entry this purchase appends for `course_id`.
  pub fn entry(&self, course_id: &str) -> PurchaseEntry {
    PurchaseEntry {
      course_id:     course_id.to_owned(),
      student_name:  self.student_name.clone(),
      student_email: self.student_email.clone(),
      paid_amount:   self.paid_amount,
    }
  }
}
