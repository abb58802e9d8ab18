//! In-memory storage engine implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use campcheck_core::storage::{
    document_id, index_key, resolve_index, set_document_id, stamp_created, stamp_updated,
    Collection, Document, RecordId, Result, StorageEngine, StorageError, ID_FIELD,
};

/// Records of one collection plus its identifier generator.
#[derive(Debug)]
struct CollectionStore {
    next_id: RecordId,
    records: BTreeMap<RecordId, Document>,
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }
}

impl CollectionStore {
    /// Rejects `document` if it would duplicate a unique index key held by
    /// any record other than `id`.
    fn check_unique(&self, collection: Collection, id: RecordId, document: &Document) -> Result<()> {
        for index in collection.indexes().iter().filter(|index| index.unique) {
            let Some(key) = index_key(document, index) else {
                continue;
            };
            let clash = self.records.iter().any(|(other_id, other)| {
                *other_id != id && index_key(other, index).as_ref() == Some(&key)
            });
            if clash {
                return Err(StorageError::UniqueViolation {
                    collection: collection.name(),
                    index: index.name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, id: RecordId, document: Document) {
        self.records.insert(id, document);
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }
}

type Stores = HashMap<Collection, CollectionStore>;

/// In-memory storage engine.
///
/// Collections are ordered maps behind a single `Arc<RwLock<_>>`. Nothing is
/// persisted; data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngine {
    stores: Arc<RwLock<Option<Stores>>>,
}

impl InMemoryEngine {
    /// Creates an engine that must still be initialized.
    pub fn new() -> Self {
        Self::default()
    }
}

fn required_id(collection: Collection, document: &Document) -> Result<RecordId> {
    document_id(document).ok_or(StorageError::MissingId {
        entity_type: collection.entity_type(),
    })
}

#[async_trait]
impl StorageEngine for InMemoryEngine {
    async fn init(&self) -> Result<()> {
        let mut guard = self.stores.write().await;
        if guard.is_none() {
            *guard = Some(
                Collection::ALL
                    .into_iter()
                    .map(|collection| (collection, CollectionStore::default()))
                    .collect(),
            );
            tracing::debug!("in-memory store initialized");
        }
        Ok(())
    }

    async fn add(&self, collection: Collection, mut record: Document) -> Result<RecordId> {
        let mut guard = self.stores.write().await;
        let stores = guard.as_mut().ok_or(StorageError::NotInitialized)?;
        let store = stores.entry(collection).or_default();

        let id = if collection.auto_increment() {
            record.remove(ID_FIELD);
            store.next_id
        } else {
            let id = required_id(collection, &record)?;
            if store.records.contains_key(&id) {
                return Err(StorageError::UniqueViolation {
                    collection: collection.name(),
                    index: ID_FIELD.to_string(),
                });
            }
            id
        };

        set_document_id(&mut record, id);
        stamp_created(&mut record, Utc::now());
        store.check_unique(collection, id, &record)?;
        store.insert(id, record);

        Ok(id)
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let guard = self.stores.read().await;
        let stores = guard.as_ref().ok_or(StorageError::NotInitialized)?;
        Ok(stores
            .get(&collection)
            .map(|store| store.records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_by_id(&self, collection: Collection, id: RecordId) -> Result<Option<Document>> {
        let guard = self.stores.read().await;
        let stores = guard.as_ref().ok_or(StorageError::NotInitialized)?;
        Ok(stores
            .get(&collection)
            .and_then(|store| store.records.get(&id).cloned()))
    }

    async fn update(&self, collection: Collection, mut record: Document) -> Result<()> {
        let id = required_id(collection, &record)?;

        let mut guard = self.stores.write().await;
        let stores = guard.as_mut().ok_or(StorageError::NotInitialized)?;
        let store = stores.entry(collection).or_default();

        if !store.records.contains_key(&id) {
            return Err(StorageError::NotFound {
                entity_type: collection.entity_type(),
                id,
            });
        }

        stamp_updated(&mut record, Utc::now());
        store.check_unique(collection, id, &record)?;
        store.insert(id, record);
        Ok(())
    }

    async fn put(&self, collection: Collection, record: Document) -> Result<()> {
        let id = required_id(collection, &record)?;

        let mut guard = self.stores.write().await;
        let stores = guard.as_mut().ok_or(StorageError::NotInitialized)?;
        let store = stores.entry(collection).or_default();

        store.check_unique(collection, id, &record)?;
        store.insert(id, record);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: RecordId) -> Result<()> {
        let mut guard = self.stores.write().await;
        let stores = guard.as_mut().ok_or(StorageError::NotInitialized)?;
        if let Some(store) = stores.get_mut(&collection) {
            store.records.remove(&id);
        }
        Ok(())
    }

    async fn get_by_index(
        &self,
        collection: Collection,
        index: &str,
        key: &[Value],
    ) -> Result<Vec<Document>> {
        let index = resolve_index(collection, index, key)?;

        let guard = self.stores.read().await;
        let stores = guard.as_ref().ok_or(StorageError::NotInitialized)?;
        let Some(store) = stores.get(&collection) else {
            return Ok(Vec::new());
        };

        Ok(store
            .records
            .values()
            .filter(|document| index_key(document, index).as_deref() == Some(key))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campcheck_core::storage::{CREATED_AT_FIELD, UPDATED_AT_FIELD};
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    async fn engine() -> InMemoryEngine {
        let engine = InMemoryEngine::new();
        engine.init().await.unwrap();
        engine
    }

    #[tokio::test]
    async fn test_operations_fail_before_init() {
        let engine = InMemoryEngine::new();

        let result = engine.get_all(Collection::Equipment).await;
        assert_eq!(result, Err(StorageError::NotInitialized));

        let result = engine
            .add(Collection::Equipment, doc(json!({ "name": "Tent" })))
            .await;
        assert_eq!(result, Err(StorageError::NotInitialized));
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let engine = engine().await;
        engine
            .add(Collection::Equipment, doc(json!({ "name": "Tent" })))
            .await
            .unwrap();

        engine.init().await.unwrap();

        assert_eq!(engine.get_all(Collection::Equipment).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids_and_stamps() {
        let engine = engine().await;

        let first = engine
            .add(Collection::Equipment, doc(json!({ "id": 99, "name": "Tent" })))
            .await
            .unwrap();
        let second = engine
            .add(Collection::Equipment, doc(json!({ "name": "Tarp" })))
            .await
            .unwrap();

        assert_eq!((first, second), (1, 2));

        let stored = engine
            .get_by_id(Collection::Equipment, first)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.get("id"), Some(&json!(1)));
        assert!(stored.contains_key(CREATED_AT_FIELD));
        assert_eq!(stored.get(CREATED_AT_FIELD), stored.get(UPDATED_AT_FIELD));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let engine = engine().await;
        let id = engine
            .add(Collection::Modules, doc(json!({ "name": "A" })))
            .await
            .unwrap();
        engine.delete(Collection::Modules, id).await.unwrap();

        let next = engine
            .add(Collection::Modules, doc(json!({ "name": "B" })))
            .await
            .unwrap();

        assert!(next > id);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let engine = engine().await;
        assert_eq!(engine.get_by_id(Collection::Checklists, 5).await, Ok(None));
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let engine = engine().await;

        let result = engine
            .update(Collection::Equipment, doc(json!({ "name": "Tent" })))
            .await;

        assert_eq!(
            result,
            Err(StorageError::MissingId {
                entity_type: "Equipment"
            })
        );
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let engine = engine().await;

        let result = engine
            .update(Collection::Equipment, doc(json!({ "id": 3, "name": "Tent" })))
            .await;

        assert!(matches!(result, Err(StorageError::NotFound { id: 3, .. })));
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let engine = engine().await;
        let id = engine
            .add(
                Collection::Equipment,
                doc(json!({ "name": "Tent", "memo": "old" })),
            )
            .await
            .unwrap();

        engine
            .update(Collection::Equipment, doc(json!({ "id": id, "name": "Big tent" })))
            .await
            .unwrap();

        let stored = engine
            .get_by_id(Collection::Equipment, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.get("name"), Some(&json!("Big tent")));
        assert!(!stored.contains_key("memo"));
        assert!(stored.contains_key(UPDATED_AT_FIELD));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let engine = engine().await;
        engine.delete(Collection::Equipment, 42).await.unwrap();
        engine.delete(Collection::Equipment, 42).await.unwrap();
    }

    #[tokio::test]
    async fn test_unique_name_index() {
        let engine = engine().await;
        engine
            .add(Collection::Modules, doc(json!({ "name": "Summer Kit" })))
            .await
            .unwrap();

        let result = engine
            .add(Collection::Modules, doc(json!({ "name": "Summer Kit" })))
            .await;

        assert!(matches!(
            result,
            Err(StorageError::UniqueViolation { collection: "modules", .. })
        ));
    }

    #[tokio::test]
    async fn test_update_may_keep_own_unique_key() {
        let engine = engine().await;
        let id = engine
            .add(Collection::Modules, doc(json!({ "name": "Summer Kit", "sortOrder": 1 })))
            .await
            .unwrap();

        engine
            .update(
                Collection::Modules,
                doc(json!({ "id": id, "name": "Summer Kit", "sortOrder": 2 })),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_composite_unique_index() {
        let engine = engine().await;
        engine
            .add(
                Collection::ModuleEquipment,
                doc(json!({ "moduleId": 1, "equipmentId": 2 })),
            )
            .await
            .unwrap();
        engine
            .add(
                Collection::ModuleEquipment,
                doc(json!({ "moduleId": 1, "equipmentId": 3 })),
            )
            .await
            .unwrap();

        let result = engine
            .add(
                Collection::ModuleEquipment,
                doc(json!({ "moduleId": 1, "equipmentId": 2 })),
            )
            .await;

        assert!(matches!(result, Err(StorageError::UniqueViolation { .. })));
    }

    #[tokio::test]
    async fn test_get_by_index() {
        let engine = engine().await;
        for (module_id, equipment_id) in [(1, 10), (1, 11), (2, 10)] {
            engine
                .add(
                    Collection::ModuleEquipment,
                    doc(json!({ "moduleId": module_id, "equipmentId": equipment_id })),
                )
                .await
                .unwrap();
        }

        let by_module = engine
            .get_by_index(Collection::ModuleEquipment, "moduleId", &[json!(1)])
            .await
            .unwrap();
        let by_equipment = engine
            .get_by_index(Collection::ModuleEquipment, "equipmentId", &[json!(10)])
            .await
            .unwrap();
        let by_pair = engine
            .get_by_index(
                Collection::ModuleEquipment,
                "moduleEquipment",
                &[json!(2), json!(10)],
            )
            .await
            .unwrap();

        assert_eq!(by_module.len(), 2);
        assert_eq!(by_equipment.len(), 2);
        assert_eq!(by_pair.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_unknown_index() {
        let engine = engine().await;

        let result = engine
            .get_by_index(Collection::Checklists, "name", &[json!("July Trip")])
            .await;

        assert!(matches!(result, Err(StorageError::UnknownIndex { .. })));
    }

    #[tokio::test]
    async fn test_put_upserts_settings() {
        let engine = engine().await;

        engine
            .put(Collection::Settings, doc(json!({ "id": 1, "darkMode": true })))
            .await
            .unwrap();
        engine
            .put(Collection::Settings, doc(json!({ "id": 1, "darkMode": false })))
            .await
            .unwrap();

        let all = engine.get_all(Collection::Settings).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].get("darkMode"), Some(&json!(false)));
        assert!(!all[0].contains_key(UPDATED_AT_FIELD));
    }

    #[tokio::test]
    async fn test_add_to_keyed_collection_requires_id() {
        let engine = engine().await;

        let result = engine
            .add(Collection::Settings, doc(json!({ "darkMode": true })))
            .await;

        assert!(matches!(result, Err(StorageError::MissingId { .. })));
    }
}
