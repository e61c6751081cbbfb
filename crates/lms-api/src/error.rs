//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as `{"success": false, "message": ...}`. Store
//! faults are logged in full and reach the caller only as their generic
//! message.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message returned for any storage fault in the catalog endpoints.
pub const GENERIC_FAILURE: &str = "Some error occured!";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized")]
  Unauthorized,

  #[error("{message}: {source}")]
  Store {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Wrap a storage fault behind a caller-facing `message`.
  pub fn store<E>(message: &'static str, e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store { message, source: Box::new(e) }
  }
}

impl From<lms_core::Error> for ApiError {
  fn from(e: lms_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": m, "data": null })),
      )
        .into_response(),
      ApiError::BadRequest(m) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "message": m })),
      )
        .into_response(),
      ApiError::Unauthorized => (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Unauthorized" })),
      )
        .into_response(),
      ApiError::Store { message, source } => {
        tracing::error!(error = %source, "{message}");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "success": false, "message": message })),
        )
          .into_response()
      }
    }
  }
}
