use serde_json::Value;

use campcheck_core::inventory::{Equipment, EquipmentStatus};
use campcheck_core::storage::{Collection, RecordId, Result};

use super::Repository;

impl Repository {
    /// Adds an equipment record and returns its new identifier.
    pub async fn add_equipment(&self, equipment: &Equipment) -> Result<RecordId> {
        let id = self.insert(equipment).await?;
        tracing::debug!(id, name = %equipment.name, "equipment added");
        Ok(id)
    }

    pub async fn get_all_equipment(&self) -> Result<Vec<Equipment>> {
        self.fetch_all().await
    }

    pub async fn get_equipment(&self, id: RecordId) -> Result<Option<Equipment>> {
        self.fetch(id).await
    }

    pub async fn update_equipment(&self, equipment: &Equipment) -> Result<()> {
        self.replace(equipment).await
    }

    /// Deletes an equipment record and every module link referencing it.
    ///
    /// Checklist items referencing it are left in place.
    pub async fn delete_equipment(&self, id: RecordId) -> Result<()> {
        self.delete_with_dependents(
            Collection::Equipment,
            id,
            Collection::ModuleEquipment,
            "equipmentId",
        )
        .await
    }

    pub async fn list_equipment_by_category(&self, category: &str) -> Result<Vec<Equipment>> {
        self.fetch_by_index("category", &[Value::from(category)])
            .await
    }

    pub async fn list_equipment_by_status(&self, status: EquipmentStatus) -> Result<Vec<Equipment>> {
        self.fetch_by_index("status", &[Value::from(status.as_str())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use campcheck_core::inventory::{Checklist, ChecklistItem, Module};
    use campcheck_core::storage::StorageError;

    use super::*;
    use crate::repository::test_support::repository;

    #[tokio::test]
    async fn test_add_and_get_equipment() {
        let repository = repository().await;

        let id = repository
            .add_equipment(
                &Equipment::new("2-person tent", "Tent/Tarp")
                    .with_kind("dome")
                    .with_memo("spare pegs in the bag"),
            )
            .await
            .unwrap();

        let stored = repository.get_equipment(id).await.unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.kind, "dome");
        assert_eq!(stored.quantity, 1);
        assert_eq!(stored.memo.as_deref(), Some("spare pegs in the bag"));
        assert!(stored.created_at.is_some());
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn test_get_missing_equipment_is_none() {
        let repository = repository().await;

        assert_eq!(repository.get_equipment(404).await, Ok(None));
    }

    #[tokio::test]
    async fn test_update_equipment() {
        let repository = repository().await;
        let id = repository
            .add_equipment(&Equipment::new("Lantern", "Lighting"))
            .await
            .unwrap();
        let mut lantern = repository.get_equipment(id).await.unwrap().unwrap();
        lantern.quantity = 3;
        lantern.status = EquipmentStatus::NeedsPurchase;

        repository.update_equipment(&lantern).await.unwrap();

        let stored = repository.get_equipment(id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 3);
        assert_eq!(stored.status, EquipmentStatus::NeedsPurchase);
        assert_eq!(stored.created_at, lantern.created_at);
        assert!(stored.updated_at >= lantern.updated_at);
    }

    #[tokio::test]
    async fn test_update_equipment_without_id_writes_nothing() {
        let repository = repository().await;
        repository
            .add_equipment(&Equipment::new("Lantern", "Lighting"))
            .await
            .unwrap();

        let result = repository
            .update_equipment(&Equipment::new("Lantern", "Lighting").with_quantity(9))
            .await;

        assert_eq!(
            result,
            Err(StorageError::MissingId {
                entity_type: "Equipment"
            })
        );
        let all = repository.get_all_equipment().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_delete_equipment_cascades_to_links_only() {
        let repository = repository().await;
        let tent = repository
            .add_equipment(&Equipment::new("Tent", "Tent/Tarp"))
            .await
            .unwrap();
        let stove = repository
            .add_equipment(&Equipment::new("Stove", "Cookware"))
            .await
            .unwrap();
        let summer = repository
            .add_module(&Module::new("Summer", 1))
            .await
            .unwrap();
        let winter = repository
            .add_module(&Module::new("Winter", 2))
            .await
            .unwrap();
        for module in [summer, winter] {
            repository.add_module_equipment(module, tent).await.unwrap();
            repository.add_module_equipment(module, stove).await.unwrap();
        }
        let checklist = repository
            .add_checklist(&Checklist::new("Trip", "2024-07-01", "2024-07-02"))
            .await
            .unwrap();
        repository
            .add_checklist_item(&ChecklistItem::new(checklist, tent, 1))
            .await
            .unwrap();

        repository.delete_equipment(tent).await.unwrap();

        assert_eq!(repository.get_equipment(tent).await, Ok(None));
        for module in [summer, winter] {
            let links = repository.get_module_links(module).await.unwrap();
            assert_eq!(links.len(), 1);
            assert_eq!(links[0].equipment_id, stove);
        }
        let items = repository.get_checklist_items(checklist).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].equipment_id, tent);
    }

    #[tokio::test]
    async fn test_delete_missing_equipment_is_ok() {
        let repository = repository().await;

        assert_eq!(repository.delete_equipment(77).await, Ok(()));
    }

    #[tokio::test]
    async fn test_list_by_category_and_status() {
        let repository = repository().await;
        repository
            .add_equipment(&Equipment::new("Tent", "Tent/Tarp"))
            .await
            .unwrap();
        repository
            .add_equipment(
                &Equipment::new("Pot", "Cookware").with_status(EquipmentStatus::NeedsReplacement),
            )
            .await
            .unwrap();
        repository
            .add_equipment(&Equipment::new("Kettle", "Cookware"))
            .await
            .unwrap();

        let cookware = repository.list_equipment_by_category("Cookware").await.unwrap();
        let worn = repository
            .list_equipment_by_status(EquipmentStatus::NeedsReplacement)
            .await
            .unwrap();

        assert_eq!(cookware.len(), 2);
        assert_eq!(worn.len(), 1);
        assert_eq!(worn[0].name, "Pot");
    }
}
