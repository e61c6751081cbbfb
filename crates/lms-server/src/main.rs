//! lms-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite course store, optionally imports seed courses, and serves the JSON
//! API over HTTP.
//!
//! # Token hash generation
//!
//! To generate the argon2 PHC string for `auth_token_hash` in config.toml:
//!
//! ```
//! cargo run -p lms-server -- --hash-token
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use lms_core::course::NewCourse;
use lms_server::{ServerConfig, auth::hash_token, expand_tilde, seed_courses};
use lms_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Course catalog API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// JSON file holding an array of courses to insert before serving.
  #[arg(long)]
  seed: Option<PathBuf>,

  /// Print the argon2 hash for a token entered on stdin and exit.
  #[arg(long)]
  hash_token: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_token {
    let token = read_token()?;
    let hash = hash_token(&token).map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if let Some(seed_path) = &cli.seed {
    let raw = tokio::fs::read_to_string(seed_path)
      .await
      .with_context(|| format!("failed to read seed file {seed_path:?}"))?;
    let courses: Vec<NewCourse> = serde_json::from_str(&raw)
      .with_context(|| format!("failed to parse seed file {seed_path:?}"))?;
    let inserted = seed_courses(&store, courses)
      .await
      .context("failed to seed courses")?;
    tracing::info!(inserted, "seeded courses from {seed_path:?}");
  }

  if server_cfg.auth_token_hash.is_none() {
    tracing::warn!("no auth_token_hash configured; catalog routes are open");
  }

  let app = lms_server::router(Arc::new(store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown())
    .await
    .context("server error")?;

  Ok(())
}

/// Read a token from stdin.
fn read_token() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Token: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let token = line.trim().to_string();
  anyhow::ensure!(!token.is_empty(), "token must not be empty");
  Ok(token)
}

async fn shutdown() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
