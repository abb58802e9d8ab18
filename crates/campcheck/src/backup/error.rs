use thiserror::Error;

use campcheck_core::backup::BackupFormatError;
use campcheck_core::storage::StorageError;

/// User-facing backup failure.
///
/// The display text is deliberately general; the underlying cause is
/// available through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Failed to export data")]
    Export(#[source] ExportError),
    #[error("Failed to import data")]
    Import(#[source] ImportError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Format(#[from] BackupFormatError),
    #[error("Could not write backup file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    InvalidDocument(#[from] BackupFormatError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Could not read backup file: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// True when the document was rejected before anything was written.
    pub fn is_invalid_document(&self) -> bool {
        matches!(self, ImportError::InvalidDocument(_))
    }
}
