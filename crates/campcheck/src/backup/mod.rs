//! Backup and restore.
//!
//! Exports the whole repository to one JSON document and imports it back,
//! either on top of existing data (`merge`) or after clearing it
//! (`replace`). Everything goes through the [`Repository`] operations.

mod error;
mod export;
mod import;

pub use error::{BackupError, ExportError, ImportError};
pub use import::ImportSummary;

use crate::repository::Repository;

/// Export/import over a repository.
#[derive(Clone)]
pub struct BackupService {
    repository: Repository,
}

impl BackupService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }
}
