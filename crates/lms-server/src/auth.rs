//! Bearer-token guard for the catalog routes.
//!
//! The server stores only an argon2 PHC hash of the token; each request's
//! `Authorization: Bearer <token>` is verified against it.

use std::sync::Arc;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::{Request, State},
  http::{HeaderMap, header},
  middleware::Next,
  response::Response,
};
use lms_api::ApiError;
use rand_core::OsRng;

/// The token accepted by this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub token_hash: String,
}

/// Hash `token` into the PHC string expected in `auth_token_hash`.
pub fn hash_token(token: &str) -> Result<String, argon2::password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(token.as_bytes(), &salt)?
      .to_string(),
  )
}

/// Verify the bearer token carried in `headers`.
pub fn verify_bearer(headers: &HeaderMap, config: &AuthConfig) -> Result<(), ApiError> {
  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or(ApiError::Unauthorized)?;

  let parsed_hash =
    PasswordHash::new(&config.token_hash).map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(token.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)
}

/// Middleware rejecting requests without a valid bearer token.
pub async fn require_bearer(
  State(config): State<Arc<AuthConfig>>,
  req: Request,
  next: Next,
) -> Result<Response, ApiError> {
  if let Err(e) = verify_bearer(req.headers(), &config) {
    tracing::warn!(path = %req.uri().path(), "rejected request without valid bearer token");
    return Err(e);
  }
  Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::HeaderValue;

  fn config(token: &str) -> AuthConfig {
    AuthConfig { token_hash: hash_token(token).unwrap() }
  }

  fn headers(value: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    h
  }

  #[test]
  fn correct_token() {
    let cfg = config("s3cret");
    assert!(verify_bearer(&headers("Bearer s3cret"), &cfg).is_ok());
  }

  #[test]
  fn wrong_token() {
    let cfg = config("s3cret");
    assert!(matches!(
      verify_bearer(&headers("Bearer nope"), &cfg),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn missing_header() {
    let cfg = config("s3cret");
    assert!(matches!(
      verify_bearer(&HeaderMap::new(), &cfg),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn basic_scheme_is_rejected() {
    let cfg = config("s3cret");
    assert!(verify_bearer(&headers("Basic czNjcmV0"), &cfg).is_err());
    assert!(verify_bearer(&headers("Bearer "), &cfg).is_err());
  }

  #[test]
  fn malformed_configured_hash_rejects_everything() {
    let cfg = AuthConfig { token_hash: "not-a-phc-string".into() };
    assert!(verify_bearer(&headers("Bearer anything"), &cfg).is_err());
  }
}
