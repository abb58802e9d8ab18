//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StorageError` from
//! `campcheck_core::storage`. Constraint failures become `UniqueViolation`.

use campcheck_core::storage::{Collection, StorageError};

/// Recovers the collection index name from a SQLite constraint message such
/// as `UNIQUE constraint failed: index 'idx_modules_name'`.
fn violated_index(message: Option<&str>, collection: Collection) -> String {
    let prefix = format!("idx_{}_", collection.name());
    message
        .and_then(|msg| msg.split("index '").nth(1))
        .and_then(|rest| rest.split('\'').next())
        .map(|name| name.strip_prefix(&prefix).unwrap_or(name).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Maps a rusqlite error to a StorageError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `StorageError::UniqueViolation` (named index)
/// - `SQLITE_CONSTRAINT_PRIMARYKEY` → `StorageError::UniqueViolation` (`id`)
/// - Cannot open → `StorageError::ConnectionFailed`
/// - All other errors → `StorageError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, collection: Collection) -> StorageError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, message)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StorageError::UniqueViolation {
                collection: collection.name(),
                index: violated_index(message.as_deref(), collection),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StorageError::UniqueViolation {
                collection: collection.name(),
                index: "id".to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            StorageError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        _ => StorageError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a StorageError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, collection: Collection) -> StorageError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, collection),
        tokio_rusqlite::Error::Close(_) | tokio_rusqlite::Error::ConnectionClosed => {
            StorageError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => StorageError::QueryFailed(err.to_string()),
    }
}
