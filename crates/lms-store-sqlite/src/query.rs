//! Translation of a [`CourseQuery`] into a SQL statement over course
//! documents.

use lms_core::catalog::{CourseQuery, SortBy};

const CATEGORY: &str = "json_extract(doc, '$.category')";
const LEVEL: &str = "json_extract(doc, '$.level')";
const LANGUAGE: &str = "json_extract(doc, '$.primaryLanguage')";
const PRICING: &str = "json_extract(doc, '$.pricing')";
const TITLE: &str = "json_extract(doc, '$.title')";

/// A statement and its positional parameters.
#[derive(Debug, PartialEq)]
pub struct CatalogSql {
  pub sql:    String,
  pub params: Vec<String>,
}

/// Build the `SELECT doc FROM courses ...` statement for `query`.
///
/// Each non-empty dimension becomes `<path> IN (?, ...)`; dimensions are
/// joined with `AND`. Rows that tie on the sort key keep insertion order.
pub fn catalog_sql(query: &CourseQuery) -> CatalogSql {
  let mut conds: Vec<String> = Vec::new();
  let mut params: Vec<String> = Vec::new();

  let levels: Vec<String> =
    query.levels.iter().map(|l| l.as_str().to_owned()).collect();

  for (path, values) in [
    (CATEGORY, &query.categories),
    (LEVEL, &levels),
    (LANGUAGE, &query.primary_languages),
  ] {
    if values.is_empty() {
      continue;
    }
    let marks = vec!["?"; values.len()].join(", ");
    conds.push(format!("{path} IN ({marks})"));
    params.extend(values.iter().cloned());
  }

  let where_clause = if query.is_unfiltered() {
    String::new()
  } else {
    format!(" WHERE {}", conds.join(" AND "))
  };

  let order = match query.sort_by {
    SortBy::PriceLowToHigh => format!("{PRICING} ASC"),
    SortBy::PriceHighToLow => format!("{PRICING} DESC"),
    SortBy::TitleAToZ => format!("{TITLE} ASC"),
    SortBy::TitleZToA => format!("{TITLE} DESC"),
  };

  CatalogSql {
    sql: format!(
      "SELECT doc FROM courses{where_clause} ORDER BY {order}, rowid ASC"
    ),
    params,
  }
}

#[cfg(test)]
mod tests {
  use lms_core::course::Level;

  use super::*;

  #[test]
  fn unfiltered_query_has_no_where_clause() {
    let out = catalog_sql(&CourseQuery::default());
    assert_eq!(
      out.sql,
      "SELECT doc FROM courses ORDER BY json_extract(doc, '$.pricing') ASC, rowid ASC"
    );
    assert!(out.params.is_empty());
  }

  #[test]
  fn dimensions_are_anded_and_values_bound_in_order() {
    let query = CourseQuery {
      categories:        vec!["dev".into(), "design".into()],
      levels:            vec![Level::Beginner],
      primary_languages: vec![],
      sort_by:           SortBy::TitleZToA,
    };
    let out = catalog_sql(&query);

    assert!(out.sql.contains(
      "WHERE json_extract(doc, '$.category') IN (?, ?) AND json_extract(doc, '$.level') IN (?)"
    ));
    assert!(!out.sql.contains("primaryLanguage"));
    assert!(out.sql.ends_with("ORDER BY json_extract(doc, '$.title') DESC, rowid ASC"));
    assert_eq!(out.params, vec!["dev", "design", "beginner"]);
  }
}
