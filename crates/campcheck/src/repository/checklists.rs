use std::collections::HashMap;

use serde_json::Value;

use campcheck_core::inventory::{Checklist, ChecklistItem, ChecklistItemDetail};
use campcheck_core::storage::{Collection, RecordId, Result, StorageError};

use super::Repository;

impl Repository {
    pub async fn add_checklist(&self, checklist: &Checklist) -> Result<RecordId> {
        let id = self.insert(checklist).await?;
        tracing::debug!(id, name = %checklist.name, "checklist added");
        Ok(id)
    }

    /// Adds a checklist and, when `from_module` is given, one unchecked item
    /// per piece of equipment linked to that module. Item quantities are
    /// copied from the equipment.
    pub async fn create_checklist(
        &self,
        checklist: &Checklist,
        from_module: Option<RecordId>,
    ) -> Result<RecordId> {
        if let Some(module_id) = from_module {
            self.ensure_exists(Collection::Modules, module_id).await?;
        }

        let id = self.add_checklist(checklist).await?;

        if let Some(module_id) = from_module {
            for equipment in self.get_module_equipment(module_id).await? {
                if let Some(equipment_id) = equipment.id {
                    self.insert(&ChecklistItem::new(id, equipment_id, equipment.quantity))
                        .await?;
                }
            }
        }

        Ok(id)
    }

    pub async fn get_all_checklists(&self) -> Result<Vec<Checklist>> {
        self.fetch_all().await
    }

    pub async fn get_checklist(&self, id: RecordId) -> Result<Option<Checklist>> {
        self.fetch(id).await
    }

    pub async fn update_checklist(&self, checklist: &Checklist) -> Result<()> {
        self.replace(checklist).await
    }

    /// Deletes a checklist and all of its items.
    pub async fn delete_checklist(&self, id: RecordId) -> Result<()> {
        self.delete_with_dependents(
            Collection::Checklists,
            id,
            Collection::ChecklistItems,
            "checklistId",
        )
        .await
    }

    /// Adds an item to an existing checklist. The referenced equipment is
    /// not checked.
    pub async fn add_checklist_item(&self, item: &ChecklistItem) -> Result<RecordId> {
        self.ensure_exists(Collection::Checklists, item.checklist_id)
            .await?;
        self.insert(item).await
    }

    pub async fn get_checklist_items(&self, checklist_id: RecordId) -> Result<Vec<ChecklistItem>> {
        self.fetch_by_index("checklistId", &[Value::from(checklist_id)])
            .await
    }

    pub async fn get_checklist_item(&self, id: RecordId) -> Result<Option<ChecklistItem>> {
        self.fetch(id).await
    }

    pub async fn update_checklist_item(&self, item: &ChecklistItem) -> Result<()> {
        self.replace(item).await
    }

    pub async fn delete_checklist_item(&self, id: RecordId) -> Result<()> {
        self.engine.delete(Collection::ChecklistItems, id).await
    }

    pub async fn set_checklist_item_checked(&self, id: RecordId, checked: bool) -> Result<()> {
        let mut item = self
            .get_checklist_item(id)
            .await?
            .ok_or(StorageError::NotFound {
                entity_type: Collection::ChecklistItems.entity_type(),
                id,
            })?;
        item.is_checked = checked;
        self.update_checklist_item(&item).await
    }

    /// Items of a checklist paired with the equipment they reference.
    pub async fn get_checklist_items_with_equipment(
        &self,
        checklist_id: RecordId,
    ) -> Result<Vec<ChecklistItemDetail>> {
        let items = self.get_checklist_items(checklist_id).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let equipment: HashMap<_, _> = self
            .get_all_equipment()
            .await?
            .into_iter()
            .filter_map(|e| e.id.map(|id| (id, e)))
            .collect();

        Ok(items
            .into_iter()
            .map(|item| ChecklistItemDetail {
                equipment: equipment.get(&item.equipment_id).cloned(),
                item,
            })
            .collect())
    }
}
