//! campcheck_core - domain types, storage contracts and backup format for
//! the campcheck gear inventory.
//!
//! Everything here is I/O free. Storage backends and the services built on
//! them live in the `campcheck` crate.

pub mod backup;
pub mod inventory;
pub mod storage;
