//! Handlers that need no authentication.

use axum::{Json, extract::State};
use lms_core::{course::PublicCourse, store::CourseStore};

use crate::{ApiState, Envelope, error::ApiError, ok};

const PUBLIC_FAILURE: &str = "Failed to fetch public courses";

/// `GET /courses/public` — the newest public courses, projected to
/// [`PublicCourse`] and capped at the configured listing limit.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Envelope<Vec<PublicCourse>>>, ApiError>
where
  S: CourseStore,
{
  let courses = state
    .store
    .list_public_courses(Some(state.public_listing_limit))
    .await
    .map_err(|e| ApiError::store(PUBLIC_FAILURE, e))?;
  Ok(ok(courses))
}

/// `GET /health`
pub async fn health() -> Json<Envelope<&'static str>> { ok("ok") }
