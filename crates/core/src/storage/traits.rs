use async_trait::async_trait;
use serde_json::Value;

use super::{Collection, Document, RecordId, Result};

/// A keyed object store with auto-assigned identifiers and secondary indexes.
///
/// Every operation except [`StorageEngine::init`] fails with
/// `StorageError::NotInitialized` until `init` has completed.
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Opens the store and establishes the schema. Idempotent.
    async fn init(&self) -> Result<()>;

    /// Inserts a record, assigning a fresh identifier and stamping
    /// `createdAt`/`updatedAt`. Returns the new identifier.
    async fn add(&self, collection: Collection, record: Document) -> Result<RecordId>;

    /// Gets every record of a collection, in identifier order.
    async fn get_all(&self, collection: Collection) -> Result<Vec<Document>>;

    /// Gets a record by its identifier.
    async fn get_by_id(&self, collection: Collection, id: RecordId) -> Result<Option<Document>>;

    /// Replaces an existing record by its `id` field and re-stamps `updatedAt`.
    async fn update(&self, collection: Collection, record: Document) -> Result<()>;

    /// Inserts or replaces a record by its `id` field, without stamping.
    async fn put(&self, collection: Collection, record: Document) -> Result<()>;

    /// Deletes a record by its identifier. Absent identifiers are not an error.
    async fn delete(&self, collection: Collection, id: RecordId) -> Result<()>;

    /// Gets every record whose index key equals `key`.
    async fn get_by_index(
        &self,
        collection: Collection,
        index: &str,
        key: &[Value],
    ) -> Result<Vec<Document>>;
}
