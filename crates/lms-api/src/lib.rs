//! JSON REST API for the course catalog.
//!
//! Exposes axum [`Router`]s backed by any [`lms_core::store::CourseStore`].
//! Every response body is an envelope carrying a `success` flag; see
//! [`Envelope`] and [`ApiError`]. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let api = lms_api::public_router(state.clone())
//!   .merge(lms_api::catalog_router(state));
//! Router::new().nest("/api", api)
//! ```

pub mod courses;
pub mod error;
pub mod public;
pub mod purchases;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use lms_core::store::CourseStore;
use serde::Serialize;

pub use error::ApiError;

/// Default cap on the public landing listing.
pub const DEFAULT_PUBLIC_LISTING_LIMIT: usize = 10;

// ─── State ────────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:                Arc<S>,
  /// Maximum number of courses returned by `GET /courses/public`.
  pub public_listing_limit: usize,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, public_listing_limit: usize) -> Self {
    Self { store, public_listing_limit }
  }
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:                Arc::clone(&self.store),
      public_listing_limit: self.public_listing_limit,
    }
  }
}

// ─── Envelope ─────────────────────────────────────────────────────────────────

/// Success body: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub success: bool,
  pub data:    T,
}

/// Wrap `data` in a success [`Envelope`].
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
  Json(Envelope { success: true, data })
}

// ─── Routers ──────────────────────────────────────────────────────────────────

/// Routes open to anonymous visitors: the landing listing and health check.
pub fn public_router<S>(state: ApiState<S>) -> Router<()>
where
  S: CourseStore + 'static,
{
  Router::new()
    .route("/courses/public", get(public::list::<S>))
    .route("/health", get(public::health))
    .with_state(state)
}

/// Catalog, detail and purchase routes. The caller decides whether to guard
/// them with authentication.
pub fn catalog_router<S>(state: ApiState<S>) -> Router<()>
where
  S: CourseStore + 'static,
{
  Router::new()
    .route("/courses", get(courses::list::<S>).post(courses::create::<S>))
    .route("/courses/{id}", get(courses::get_one::<S>))
    .route(
      "/courses/{id}/purchased-by/{student_id}",
      get(purchases::check::<S>),
    )
    .route("/courses/{id}/purchases", post(purchases::record::<S>))
    .with_state(state)
}
