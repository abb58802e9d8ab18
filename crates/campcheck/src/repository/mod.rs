//! Domain repository.
//!
//! Typed operations over a [`StorageEngine`]. The repository owns the
//! referential rules between collections: link rows are checked against
//! their owners on creation and removed with them on deletion.
//!
//! Operations are split by entity:
//!
//! - `equipment`: equipment CRUD and index lookups
//! - `modules`: modules and module-equipment links
//! - `checklists`: checklists and checklist items
//! - `settings`: the settings singleton

mod checklists;
mod equipment;
mod modules;
mod settings;

use std::sync::Arc;

use serde_json::Value;

use campcheck_core::storage::{
    document_id, from_document, to_document, Collection, Record, RecordId, Result,
    StorageEngine, StorageError,
};

/// Typed, invariant-preserving access to the store.
///
/// Cheap to clone; clones share the engine.
#[derive(Clone)]
pub struct Repository {
    engine: Arc<dyn StorageEngine>,
}

impl Repository {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { engine }
    }

    /// Initializes the underlying engine. Must be called once before any
    /// other operation.
    pub async fn init(&self) -> Result<()> {
        self.engine.init().await
    }

    /// Deletes every checklist, module and equipment record, cascading to
    /// their items and links. Settings are kept.
    pub async fn clear_all(&self) -> Result<()> {
        for checklist in self.get_all_checklists().await? {
            if let Some(id) = checklist.id {
                self.delete_checklist(id).await?;
            }
        }
        for module in self.get_all_modules().await? {
            if let Some(id) = module.id {
                self.delete_module(id).await?;
            }
        }
        for equipment in self.get_all_equipment().await? {
            if let Some(id) = equipment.id {
                self.delete_equipment(id).await?;
            }
        }
        tracing::info!("all inventory data cleared");
        Ok(())
    }

    async fn insert<T: Record>(&self, record: &T) -> Result<RecordId> {
        self.engine.add(T::COLLECTION, to_document(record)?).await
    }

    async fn fetch<T: Record>(&self, id: RecordId) -> Result<Option<T>> {
        self.engine
            .get_by_id(T::COLLECTION, id)
            .await?
            .map(from_document)
            .transpose()
    }

    async fn fetch_all<T: Record>(&self) -> Result<Vec<T>> {
        self.engine
            .get_all(T::COLLECTION)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    async fn fetch_by_index<T: Record>(&self, index: &str, key: &[Value]) -> Result<Vec<T>> {
        self.engine
            .get_by_index(T::COLLECTION, index, key)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Full replace of a stored record. Fails with `MissingId` before
    /// anything is written when the record has no identifier.
    async fn replace<T: Record>(&self, record: &T) -> Result<()> {
        if record.id().is_none() {
            return Err(StorageError::MissingId {
                entity_type: T::COLLECTION.entity_type(),
            });
        }
        self.engine.update(T::COLLECTION, to_document(record)?).await
    }

    /// Fails with `DanglingReference` unless `id` exists in `collection`.
    async fn ensure_exists(&self, collection: Collection, id: RecordId) -> Result<()> {
        match self.engine.get_by_id(collection, id).await? {
            Some(_) => Ok(()),
            None => Err(StorageError::DanglingReference {
                entity_type: collection.entity_type(),
                id,
            }),
        }
    }

    /// Deletes every `dependent` record whose `index` key is `id`, then the
    /// owner record itself. Dependents are removed one at a time, in order.
    async fn delete_with_dependents(
        &self,
        owner: Collection,
        id: RecordId,
        dependent: Collection,
        index: &str,
    ) -> Result<()> {
        let dependents = self
            .engine
            .get_by_index(dependent, index, &[Value::from(id)])
            .await?;

        for document in &dependents {
            if let Some(dependent_id) = document_id(document) {
                self.engine.delete(dependent, dependent_id).await?;
            }
        }

        self.engine.delete(owner, id).await?;

        tracing::debug!(
            %owner,
            id,
            %dependent,
            removed = dependents.len(),
            "deleted with dependents"
        );
        Ok(())
    }
}
