//! SQLite backend for the course catalog.
//!
//! Courses and student ledgers are stored as JSON documents, one per row.
//! Catalog filters are evaluated by SQLite over `json_extract` paths.
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod query;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
