//! campcheck - inventory and packing lists for camping gear.
//!
//! Storage backends, the domain repository, backup/restore and the
//! command-line front end. Pure domain types live in `campcheck_core`.

pub mod backup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod repository;
pub mod storage;

pub use backup::{BackupError, BackupService, ImportSummary};
pub use config::Config;
pub use repository::Repository;
