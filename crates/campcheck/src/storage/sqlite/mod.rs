//! SQLite storage backend.
//!
//! This module provides a SQLite implementation of
//! [`StorageEngine`](campcheck_core::storage::StorageEngine) using `rusqlite`
//! with async support via `tokio-rusqlite`. Documents are stored as JSON
//! text, and the declared indexes are expression indexes over
//! `json_extract`.
//!
//! # Example
//!
//! ```rust,ignore
//! use campcheck::storage::sqlite::SqliteEngine;
//!
//! let engine = SqliteEngine::new("campcheck.db");
//! engine.init().await?;
//! ```

mod conversions;
mod engine;
mod error;
mod schema;

pub use engine::SqliteEngine;
