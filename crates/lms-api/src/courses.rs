//! Handlers for `/courses` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses` | Optional `category`, `level`, `primaryLanguage` (comma-separated), `sortBy` |
//! | `POST` | `/courses` | Body: [`NewCourse`]; returns 201 + stored course |
//! | `GET`  | `/courses/:id` | 404 if the id is malformed, undecodable or unknown |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use lms_core::{
  catalog::CourseQuery,
  course::{Course, NewCourse},
  store::CourseStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  ApiState, Envelope,
  error::{ApiError, GENERIC_FAILURE},
  ok,
};

const NO_COURSE_DETAILS: &str = "No course details found";

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  /// Comma-separated categories, any of which may match.
  pub category:         Option<String>,
  /// Comma-separated levels; each must be a known level.
  pub level:            Option<String>,
  pub primary_language: Option<String>,
  /// One of the `price-*` / `title-*` keys; anything else sorts by price.
  pub sort_by:          Option<String>,
}

/// `GET /courses[?category=...][&level=...][&primaryLanguage=...][&sortBy=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Envelope<Vec<Course>>>, ApiError>
where
  S: CourseStore,
{
  let Query(params) =
    params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let query = CourseQuery::from_params(
    params.category.as_deref(),
    params.level.as_deref(),
    params.primary_language.as_deref(),
    params.sort_by.as_deref(),
  )?;
  tracing::debug!(?query, "listing courses");

  let courses = state
    .store
    .list_courses(&query)
    .await
    .map_err(|e| ApiError::store(GENERIC_FAILURE, e))?;
  Ok(ok(courses))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /courses/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<Course>>, ApiError>
where
  S: CourseStore,
{
  // An id that is not a UUID, or not even UTF-8, names no stored course.
  let id = id
    .ok()
    .and_then(|Path(id)| Uuid::parse_str(&id).ok())
    .ok_or_else(|| ApiError::NotFound(NO_COURSE_DETAILS.to_owned()))?;

  let course = state
    .store
    .get_course(id)
    .await
    .map_err(|e| ApiError::store(GENERIC_FAILURE, e))?
    .ok_or_else(|| ApiError::NotFound(NO_COURSE_DETAILS.to_owned()))?;
  Ok(ok(course))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /courses` — returns 201 + the stored [`Course`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  payload: Result<Json<NewCourse>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore,
{
  let Json(input) =
    payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  input.validate()?;

  let course = state
    .store
    .add_course(input)
    .await
    .map_err(|e| ApiError::store(GENERIC_FAILURE, e))?;
  tracing::info!(course_id = %course.course_id, title = %course.title, "course created");
  Ok((StatusCode::CREATED, ok(course)))
}
