use serde_json::Value;
use thiserror::Error;

use super::BackupDocument;

/// Errors that can occur when reading a backup document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackupFormatError {
    #[error("Malformed JSON: {0}")]
    Malformed(String),
    #[error("Not a valid backup file: missing {0}")]
    MissingField(&'static str),
    #[error("Not a valid backup file: {0}")]
    Invalid(String),
}

/// Checks the fields every backup must carry: a non-empty `version` and an
/// `equipment` array. Nothing else is validated up front.
pub fn check_required_fields(value: &Value) -> Result<(), BackupFormatError> {
    let has_version = value
        .get("version")
        .and_then(Value::as_str)
        .is_some_and(|version| !version.is_empty());
    if !has_version {
        return Err(BackupFormatError::MissingField("version"));
    }

    if !value.get("equipment").is_some_and(Value::is_array) {
        return Err(BackupFormatError::MissingField("equipment"));
    }

    Ok(())
}

/// Parses backup text (file contents or clipboard) into a document.
pub fn parse_backup(text: &str) -> Result<BackupDocument, BackupFormatError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| BackupFormatError::Malformed(e.to_string()))?;

    check_required_fields(&value)?;

    serde_json::from_value(value).map_err(|e| BackupFormatError::Invalid(e.to_string()))
}
