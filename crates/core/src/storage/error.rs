use thiserror::Error;

use super::RecordId;

/// Errors that can occur during storage engine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage engine not initialized")]
    NotInitialized,
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: RecordId,
    },
    #[error("{entity_type} ID is required")]
    MissingId { entity_type: &'static str },
    #[error("Unique index {index} violated in {collection}")]
    UniqueViolation {
        collection: &'static str,
        index: String,
    },
    #[error("Unknown index {index} on {collection}")]
    UnknownIndex {
        collection: &'static str,
        index: String,
    },
    #[error("{entity_type} {id} does not exist")]
    DanglingReference {
        entity_type: &'static str,
        id: RecordId,
    },
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Returns true for caller mistakes (missing IDs, bad references, bad keys)
    /// as opposed to failures of the underlying store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StorageError::MissingId { .. }
                | StorageError::UniqueViolation { .. }
                | StorageError::UnknownIndex { .. }
                | StorageError::DanglingReference { .. }
                | StorageError::InvalidData(_)
        )
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
