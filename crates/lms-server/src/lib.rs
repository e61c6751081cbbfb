//! HTTP server assembly for the course catalog.
//!
//! Wires the [`lms_api`] routers under `/api`, optionally guards the catalog
//! routes with a bearer token, and adds request tracing.

pub mod auth;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, middleware};
use lms_api::ApiState;
use lms_core::{course::NewCourse, store::CourseStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, require_bearer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `LMS_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  /// Cap on `GET /api/courses/public`.
  #[serde(default = "default_public_listing_limit")]
  pub public_listing_limit: usize,
  /// Argon2 hash of the bearer token. When unset the API is open.
  #[serde(default)]
  pub auth_token_hash:      Option<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("lms.sqlite3") }

fn default_public_listing_limit() -> usize {
  lms_api::DEFAULT_PUBLIC_LISTING_LIMIT
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 default_host(),
      port:                 default_port(),
      store_path:           default_store_path(),
      public_listing_limit: default_public_listing_limit(),
      auth_token_hash:      None,
    }
  }
}

impl ServerConfig {
  /// Load from an optional TOML file, then `LMS_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("LMS"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router for `store` according to `config`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: CourseStore + 'static,
{
  let state = ApiState::new(store, config.public_listing_limit);

  let mut catalog = lms_api::catalog_router(state.clone());
  if let Some(hash) = &config.auth_token_hash {
    let auth = Arc::new(AuthConfig { token_hash: hash.clone() });
    catalog = catalog.route_layer(middleware::from_fn_with_state(auth, require_bearer));
  }

  let api = lms_api::public_router(state).merge(catalog);

  Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Seeding ──────────────────────────────────────────────────────────────────

/// Insert every course in `courses`, returning how many were stored.
/// Stops at the first course the store rejects.
pub async fn seed_courses<S>(store: &S, courses: Vec<NewCourse>) -> Result<usize, S::Error>
where
  S: CourseStore,
{
  let mut inserted = 0;
  for input in courses {
    let course = store.add_course(input).await?;
    tracing::debug!(course_id = %course.course_id, title = %course.title, "seeded course");
    inserted += 1;
  }
  Ok(inserted)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use lms_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_router(token: Option<&str>) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let config = ServerConfig {
      auth_token_hash: token.map(|t| auth::hash_token(t).unwrap()),
      ..ServerConfig::default()
    };
    router(Arc::new(store), &config)
  }

  async fn get(router: Router, uri: &str, bearer: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    router.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
  }

  #[tokio::test]
  async fn open_server_serves_catalog_under_api_prefix() {
    let app = make_router(None).await;
    let resp = get(app.clone(), "/api/courses", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get(app, "/courses", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn guarded_catalog_requires_bearer_token() {
    let app = make_router(Some("s3cret")).await;

    let resp = get(app.clone(), "/api/courses", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);

    let resp = get(app.clone(), "/api/courses", Some("wrong")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = get(app, "/api/courses", Some("s3cret")).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn public_routes_stay_open_when_guarded() {
    let app = make_router(Some("s3cret")).await;

    let resp = get(app.clone(), "/api/courses/public", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get(app, "/api/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn configured_public_listing_limit_is_applied() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    for title in ["One", "Two", "Three"] {
      let mut input = NewCourse::new(title, 1.0);
      input.is_public = true;
      store.add_course(input).await.unwrap();
    }
    let config = ServerConfig { public_listing_limit: 2, ..ServerConfig::default() };
    let app = router(Arc::new(store), &config);

    let resp = get(app, "/api/courses/public", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn seed_inserts_all_courses() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let courses: Vec<NewCourse> = serde_json::from_str(
      r#"[
        { "title": "One", "pricing": 1 },
        { "title": "Two", "pricing": 2, "isPublic": true }
      ]"#,
    )
    .unwrap();

    assert_eq!(seed_courses(&store, courses).await.unwrap(), 2);
    assert_eq!(store.list_public_courses(None).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn seed_stops_at_invalid_course() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let courses = vec![
      NewCourse::new("Good", 1.0),
      NewCourse::new("", 1.0),
      NewCourse::new("Never reached", 1.0),
    ];
    assert!(seed_courses(&store, courses).await.is_err());
    let all = store
      .list_courses(&lms_core::catalog::CourseQuery::default())
      .await
      .unwrap();
    assert_eq!(all.len(), 1);
  }

  #[test]
  fn defaults_apply_without_a_config_file() {
    let cfg = ServerConfig::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(cfg.public_listing_limit, 10);
    assert!(cfg.auth_token_hash.is_none());
  }

  #[test]
  fn tilde_is_expanded() {
    let expanded = expand_tilde(Path::new("~/lms.sqlite3"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expanded, PathBuf::from(home).join("lms.sqlite3"));
    }
    assert_eq!(expand_tilde(Path::new("/abs/db")), PathBuf::from("/abs/db"));
  }
}
