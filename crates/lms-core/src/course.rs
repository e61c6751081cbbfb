//! Course documents and their embedded parts.
//!
//! A course owns its curriculum and a snapshot of every student who paid for
//! it. The snapshots are historical copies taken at purchase time and are not
//! kept in sync with any student profile.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Level ───────────────────────────────────────────────────────────────────

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Beginner,
  Intermediate,
  Advanced,
}

impl Level {
  /// The lowercase form stored in course documents.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
    }
  }
}

impl FromStr for Level {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "beginner" => Ok(Self::Beginner),
      "intermediate" => Ok(Self::Intermediate),
      "advanced" => Ok(Self::Advanced),
      other => Err(Error::UnknownLevel(other.to_owned())),
    }
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Embedded parts ──────────────────────────────────────────────────────────

/// One unit of a course's curriculum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
  pub title:        String,
  pub video_url:    Option<String>,
  /// Identifier of the uploaded video at the media host.
  pub public_id:    Option<String>,
  #[serde(default)]
  pub free_preview: bool,
}

/// A copy of the student's details taken when they paid for the course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSnapshot {
  pub student_id:    String,
  pub student_name:  String,
  pub student_email: String,
  pub paid_amount:   f64,
}

// ─── Course ──────────────────────────────────────────────────────────────────

/// A purchasable course as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
  #[serde(rename = "_id")]
  pub course_id:        Uuid,
  pub instructor_id:    Option<String>,
  pub instructor_name:  Option<String>,
  /// Creation timestamp; set by the store when the caller leaves it out.
  pub date:             DateTime<Utc>,
  pub title:            String,
  pub category:         Option<String>,
  pub level:            Option<Level>,
  pub primary_language: Option<String>,
  pub subtitle:         Option<String>,
  pub description:      Option<String>,
  pub image:            Option<String>,
  pub welcome_message:  Option<String>,
  pub pricing:          f64,
  pub objectives:       Option<String>,
  #[serde(default)]
  pub students:         Vec<StudentSnapshot>,
  #[serde(default)]
  pub curriculum:       Vec<Lecture>,
  #[serde(default)]
  pub is_published:     bool,
  /// Only courses with this flag set appear in the public landing listing.
  #[serde(default)]
  pub is_public:        bool,
}

// ─── NewCourse ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::CourseStore::add_course`].
/// The identifier is always assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
  pub instructor_id:    Option<String>,
  pub instructor_name:  Option<String>,
  pub date:             Option<DateTime<Utc>>,
  pub title:            String,
  pub category:         Option<String>,
  pub level:            Option<Level>,
  pub primary_language: Option<String>,
  pub subtitle:         Option<String>,
  pub description:      Option<String>,
  pub image:            Option<String>,
  pub welcome_message:  Option<String>,
  pub pricing:          f64,
  pub objectives:       Option<String>,
  #[serde(default)]
  pub curriculum:       Vec<Lecture>,
  #[serde(default)]
  pub is_published:     bool,
  #[serde(default)]
  pub is_public:        bool,
}

impl NewCourse {
  /// Convenience constructor with all optional fields left empty.
  pub fn new(title: impl Into<String>, pricing: f64) -> Self {
    Self { title: title.into(), pricing, ..Self::default() }
  }

  /// Check the invariants every stored course must satisfy.
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::EmptyTitle);
    }
    if !self.pricing.is_finite() || self.pricing < 0.0 {
      return Err(Error::InvalidPricing(self.pricing));
    }
    // Stored timestamps are ordered as text, which only holds for 4-digit years.
    if let Some(date) = self.date
      && !(0..=9999).contains(&date.year())
    {
      return Err(Error::DateOutOfRange(date.year()));
    }
    Ok(())
  }

  /// Turn the input into a stored course. `now` fills in a missing `date`.
  pub fn into_course(self, course_id: Uuid, now: DateTime<Utc>) -> Course {
    Course {
      course_id,
      instructor_id: self.instructor_id,
      instructor_name: self.instructor_name,
      date: self.date.unwrap_or(now),
      title: self.title,
      category: self.category,
      level: self.level,
      primary_language: self.primary_language,
      subtitle: self.subtitle,
      description: self.description,
      image: self.image,
      welcome_message: self.welcome_message,
      pricing: self.pricing,
      objectives: self.objectives,
      students: Vec::new(),
      curriculum: self.curriculum,
      is_published: self.is_published,
      is_public: self.is_public,
    }
  }
}

// ─── Public projection ───────────────────────────────────────────────────────

/// The view of a course shown to anonymous visitors on the landing page.
///
/// Student snapshots, the instructor id, the description and the welcome
/// message have no field here, so they can never be serialised by accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCourse {
  #[serde(rename = "_id")]
  pub course_id:       Uuid,
  pub title:           String,
  pub instructor_name: Option<String>,
  pub image:           Option<String>,
  pub curriculum:      Vec<Lecture>,
  pub level:           Option<Level>,
  pub pricing:         f64,
}

impl From<Course> for PublicCourse {
  fn from(c: Course) -> Self {
    PublicCourse {
      course_id:       c.course_id,
      title:           c.title,
      instructor_name: c.instructor_name,
      image:           c.image,
      curriculum:      c.curriculum,
      level:           c.level,
      pricing:         c.pricing,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn full_course() -> Course {
    let mut input = NewCourse::new("Rust in Practice", 49.0);
    input.instructor_id = Some("inst-1".into());
    input.instructor_name = Some("Ferris".into());
    input.description = Some("long form".into());
    input.welcome_message = Some("hello".into());
    input.level = Some(Level::Intermediate);
    input.curriculum = vec![Lecture {
      title:        "Ownership".into(),
      video_url:    Some("https://videos.example/1".into()),
      public_id:    Some("vid-1".into()),
      free_preview: true,
    }];
    let mut course = input.into_course(Uuid::new_v4(), Utc::now());
    course.students.push(StudentSnapshot {
      student_id:    "s1".into(),
      student_name:  "Ada".into(),
      student_email: "ada@example.com".into(),
      paid_amount:   49.0,
    });
    course
  }

  #[test]
  fn level_parses_the_three_known_values() {
    assert_eq!("beginner".parse::<Level>().unwrap(), Level::Beginner);
    assert_eq!("intermediate".parse::<Level>().unwrap(), Level::Intermediate);
    assert_eq!("advanced".parse::<Level>().unwrap(), Level::Advanced);
  }

  #[test]
  fn level_rejects_unknown_and_miscased_values() {
    assert!(matches!("expert".parse::<Level>(), Err(Error::UnknownLevel(v)) if v == "expert"));
    assert!("Beginner".parse::<Level>().is_err());
  }

  #[test]
  fn validate_rejects_blank_title() {
    let err = NewCourse::new("   ", 10.0).validate().unwrap_err();
    assert!(matches!(err, Error::EmptyTitle));
  }

  #[test]
  fn validate_rejects_negative_and_nan_pricing() {
    assert!(matches!(
      NewCourse::new("A", -1.0).validate(),
      Err(Error::InvalidPricing(_))
    ));
    assert!(NewCourse::new("A", f64::NAN).validate().is_err());
    assert!(NewCourse::new("A", 0.0).validate().is_ok());
  }

  #[test]
  fn validate_rejects_dates_beyond_four_digit_years() {
    let mut input = NewCourse::new("A", 1.0);
    input.date = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).single();
    assert!(matches!(input.validate(), Err(Error::DateOutOfRange(10000))));

    input.date = Utc.with_ymd_and_hms(-1, 6, 1, 0, 0, 0).single();
    assert!(matches!(input.validate(), Err(Error::DateOutOfRange(-1))));

    input.date = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).single();
    assert!(input.validate().is_ok());
  }

  #[test]
  fn into_course_keeps_supplied_date() {
    let date = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let mut input = NewCourse::new("A", 1.0);
    input.date = Some(date);
    let course = input.into_course(Uuid::new_v4(), Utc::now());
    assert_eq!(course.date, date);
    assert!(course.students.is_empty());
  }

  #[test]
  fn course_serialises_with_camel_case_and_underscore_id() {
    let course = full_course();
    let json = serde_json::to_value(&course).unwrap();
    assert_eq!(json["_id"], course.course_id.to_string());
    assert_eq!(json["level"], "intermediate");
    assert_eq!(json["curriculum"][0]["freePreview"], true);
    assert_eq!(json["students"][0]["studentEmail"], "ada@example.com");
  }

  #[test]
  fn public_projection_drops_sensitive_fields() {
    let course = full_course();
    let id = course.course_id;
    let public = PublicCourse::from(course);
    let json = serde_json::to_value(&public).unwrap();
    let obj = json.as_object().unwrap();

    for hidden in ["students", "instructorId", "description", "welcomeMessage"] {
      assert!(!obj.contains_key(hidden), "{hidden} leaked: {json}");
    }
    assert_eq!(json["_id"], id.to_string());
    assert_eq!(json["instructorName"], "Ferris");
    assert_eq!(json["curriculum"][0]["title"], "Ownership");
    assert_eq!(json["pricing"], 49.0);
  }
}
