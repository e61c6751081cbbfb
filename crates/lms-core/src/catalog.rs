//! Catalog query types.
//!
//! A [`CourseQuery`] is the validated form of the catalog listing's query
//! string. Filter dimensions combine with AND; the values inside one
//! dimension combine with OR. An empty dimension imposes no constraint.

use crate::{Result, course::Level};

// ─── Sort ────────────────────────────────────────────────────────────────────

/// Ordering applied to catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
  #[default]
  PriceLowToHigh,
  PriceHighToLow,
  TitleAToZ,
  TitleZToA,
}

impl SortBy {
  /// Parse a sort key, falling back to [`SortBy::PriceLowToHigh`] for
  /// anything unrecognised.
  pub fn parse_or_default(s: &str) -> Self {
    match s.trim() {
      "price-lowtohigh" => Self::PriceLowToHigh,
      "price-hightolow" => Self::PriceHighToLow,
      "title-atoz" => Self::TitleAToZ,
      "title-ztoa" => Self::TitleZToA,
      _ => Self::default(),
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::CourseStore::list_courses`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseQuery {
  pub categories:        Vec<String>,
  pub levels:            Vec<Level>,
  pub primary_languages: Vec<String>,
  pub sort_by:           SortBy,
}

impl CourseQuery {
  /// Build a query from raw comma-separated query-string values.
  ///
  /// Fails only when a `level` value is outside the known enumeration.
  pub fn from_params(
    category: Option<&str>,
    level: Option<&str>,
    primary_language: Option<&str>,
    sort_by: Option<&str>,
  ) -> Result<Self> {
    let levels = split_values(level)
      .iter()
      .map(|l| l.parse::<Level>())
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      categories: split_values(category),
      levels,
      primary_languages: split_values(primary_language),
      sort_by: sort_by.map(SortBy::parse_or_default).unwrap_or_default(),
    })
  }

  /// `true` when no filter dimension is constrained.
  pub fn is_unfiltered(&self) -> bool {
    self.categories.is_empty()
      && self.levels.is_empty()
      && self.primary_languages.is_empty()
  }
}

/// Split a comma-separated value, trimming segments and dropping empty ones.
fn split_values(raw: Option<&str>) -> Vec<String> {
  raw
    .map(|s| {
      s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect()
    })
    .unwrap_or_default()
}
