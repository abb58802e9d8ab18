//! In-memory storage backend.
//!
//! Implements [`StorageEngine`](campcheck_core::storage::StorageEngine) over
//! ordered maps wrapped in `Arc<RwLock<_>>`. Used by the test suites and
//! whenever the binary is built without the `sqlite` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use campcheck::storage::inmemory::InMemoryEngine;
//!
//! let engine = InMemoryEngine::new();
//! engine.init().await?;
//! ```

mod engine;

pub use engine::InMemoryEngine;
