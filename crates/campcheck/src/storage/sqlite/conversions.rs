//! SQLite row conversion functions.
//!
//! Pure functions for moving documents in and out of the `data` column.
//! These are testable in isolation without database access.

use rusqlite::types::{Type, Value as SqlValue};
use rusqlite::Row;
use serde_json::Value;

use campcheck_core::storage::{set_document_id, Document, Result, StorageError, ID_FIELD};

/// Serializes a document for the `data` column. The identifier lives in
/// its own column and is left out.
pub fn document_to_data(document: &Document) -> Result<String> {
    let mut data = document.clone();
    data.remove(ID_FIELD);
    serde_json::to_string(&data).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Converts a row to a document.
///
/// Expected columns: id, data
pub fn row_to_document(row: &Row) -> rusqlite::Result<Document> {
    let id: i64 = row.get(0)?;
    let data: String = row.get(1)?;

    let mut document: Document = serde_json::from_str(&data)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    set_document_id(&mut document, id);
    Ok(document)
}

/// Converts an index key component to the SQL value `json_extract` yields
/// for it: booleans become 0/1, containers their JSON text.
pub fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_string()),
    }
}
