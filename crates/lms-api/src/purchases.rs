//! Handlers for purchase endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses/:id/purchased-by/:student_id` | `data` is `true` iff the student's ledger lists the course; 400 if the path cannot be decoded |
//! | `POST` | `/courses/:id/purchases` | Body: [`NewPurchase`]; returns 201 + the updated ledger |

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use lms_core::{ledger::{self, NewPurchase}, store::CourseStore};
use uuid::Uuid;

use crate::{
  ApiState, Envelope,
  error::{ApiError, GENERIC_FAILURE},
  ok,
};

/// `GET /courses/:id/purchased-by/:student_id`
///
/// A student without a ledger has not purchased anything; that is `false`,
/// not an error. The course id is compared verbatim against ledger entries.
pub async fn check<S>(
  State(state): State<ApiState<S>>,
  ids: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Envelope<bool>>, ApiError>
where
  S: CourseStore,
{
  let Path((course_id, student_id)) =
    ids.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let ledger = state
    .store
    .get_ledger(&student_id)
    .await
    .map_err(|e| ApiError::store(GENERIC_FAILURE, e))?;

  Ok(ok(ledger::has_purchased(ledger.as_ref(), &course_id)))
}

/// `POST /courses/:id/purchases` — body: [`NewPurchase`].
pub async fn record<S>(
  State(state): State<ApiState<S>>,
  course_id: Result<Path<String>, PathRejection>,
  payload: Result<Json<NewPurchase>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore,
{
  let Path(course_id) = course_id
    .map_err(|_| ApiError::NotFound("course not found".to_owned()))?;
  let not_found = || ApiError::NotFound(format!("course {course_id} not found"));

  let id = Uuid::parse_str(&course_id).map_err(|_| not_found())?;
  let Json(purchase) =
    payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  purchase.validate()?;

  let student_id = purchase.student_id.clone();
  let ledger = state
    .store
    .record_purchase(id, purchase)
    .await
    .map_err(|e| ApiError::store(GENERIC_FAILURE, e))?
    .ok_or_else(not_found)?;

  tracing::info!(course_id = %id, %student_id, "purchase recorded");
  Ok((StatusCode::CREATED, ok(ledger)))
}
