//! Record <-> document conversion.
//!
//! Backends store schemaless JSON objects; typed entities cross that
//! boundary through `serde_json`. Timestamp stamping and index-key
//! extraction live here so every backend behaves the same way.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use super::{Collection, IndexSpec, Result, StorageError};

/// Identifier assigned by the store.
pub type RecordId = i64;

/// A stored record: a JSON object.
pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// A typed entity persisted in one collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    /// The store-assigned identifier, absent until the record is added.
    fn id(&self) -> Option<RecordId>;
}

/// Serializes a record into a document.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document> {
    match serde_json::to_value(record)? {
        Value::Object(document) => Ok(document),
        other => Err(StorageError::InvalidData(format!(
            "record must serialize to an object, got {other}"
        ))),
    }
}

/// Deserializes a document into a record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

pub fn document_id(document: &Document) -> Option<RecordId> {
    document.get(ID_FIELD).and_then(Value::as_i64)
}

pub fn set_document_id(document: &mut Document, id: RecordId) {
    document.insert(ID_FIELD.to_string(), Value::from(id));
}

/// Sets both `createdAt` and `updatedAt` to `now`.
pub fn stamp_created(document: &mut Document, now: DateTime<Utc>) {
    let stamp = Value::String(format_timestamp(&now));
    document.insert(CREATED_AT_FIELD.to_string(), stamp.clone());
    document.insert(UPDATED_AT_FIELD.to_string(), stamp);
}

/// Sets `updatedAt` to `now`, leaving `createdAt` as given.
pub fn stamp_updated(document: &mut Document, now: DateTime<Utc>) {
    document.insert(
        UPDATED_AT_FIELD.to_string(),
        Value::String(format_timestamp(&now)),
    );
}

fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Extracts the key of `document` under `index`.
///
/// Returns `None` when any key field is missing or null; such records are
/// not part of the index.
pub fn index_key(document: &Document, index: &IndexSpec) -> Option<Vec<Value>> {
    index
        .key_path
        .iter()
        .map(|field| document.get(*field).filter(|v| !v.is_null()).cloned())
        .collect()
}

/// Resolves an index by name and checks the lookup key has one component
/// per key-path field.
pub fn resolve_index(
    collection: Collection,
    index_name: &str,
    key: &[Value],
) -> Result<&'static IndexSpec> {
    let index = collection
        .index(index_name)
        .ok_or_else(|| StorageError::UnknownIndex {
            collection: collection.name(),
            index: index_name.to_string(),
        })?;

    if index.key_path.len() != key.len() {
        return Err(StorageError::InvalidData(format!(
            "index {index_name} on {collection} expects {} key component(s), got {}",
            index.key_path.len(),
            key.len()
        )));
    }

    Ok(index)
}
