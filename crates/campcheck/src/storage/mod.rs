//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `StorageEngine`
//! trait defined in `campcheck_core::storage`.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory backend is always available.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p campcheck
//! ```
//!
//! Build with the in-memory backend only:
//! ```bash
//! cargo build -p campcheck --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryEngine;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteEngine;
