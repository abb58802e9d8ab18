use std::collections::HashSet;

use serde_json::Value;

use campcheck_core::inventory::{sort_modules, Equipment, Module, ModuleEquipment};
use campcheck_core::storage::{Collection, RecordId, Result};

use super::Repository;

impl Repository {
    pub async fn add_module(&self, module: &Module) -> Result<RecordId> {
        let id = self.insert(module).await?;
        tracing::debug!(id, name = %module.name, "module added");
        Ok(id)
    }

    /// All modules ordered by `sort_order`, ties kept in insertion order.
    pub async fn get_all_modules(&self) -> Result<Vec<Module>> {
        let mut modules: Vec<Module> = self.fetch_all().await?;
        sort_modules(&mut modules);
        Ok(modules)
    }

    pub async fn get_module(&self, id: RecordId) -> Result<Option<Module>> {
        self.fetch(id).await
    }

    pub async fn update_module(&self, module: &Module) -> Result<()> {
        self.replace(module).await
    }

    /// Deletes a module and its equipment links. The equipment is kept.
    pub async fn delete_module(&self, id: RecordId) -> Result<()> {
        self.delete_with_dependents(
            Collection::Modules,
            id,
            Collection::ModuleEquipment,
            "moduleId",
        )
        .await
    }

    /// Links a piece of equipment to a module.
    ///
    /// Both records must exist. Linking the same pair twice fails with
    /// `UniqueViolation`.
    pub async fn add_module_equipment(
        &self,
        module_id: RecordId,
        equipment_id: RecordId,
    ) -> Result<RecordId> {
        self.ensure_exists(Collection::Modules, module_id).await?;
        self.ensure_exists(Collection::Equipment, equipment_id)
            .await?;
        self.insert(&ModuleEquipment::new(module_id, equipment_id))
            .await
    }

    /// Removes the link between a module and a piece of equipment, if any.
    pub async fn remove_module_equipment(
        &self,
        module_id: RecordId,
        equipment_id: RecordId,
    ) -> Result<()> {
        let links: Vec<ModuleEquipment> = self
            .fetch_by_index(
                "moduleEquipment",
                &[Value::from(module_id), Value::from(equipment_id)],
            )
            .await?;

        for link in links {
            if let Some(id) = link.id {
                self.engine.delete(Collection::ModuleEquipment, id).await?;
            }
        }
        Ok(())
    }

    /// Link rows of a module, in insertion order.
    pub async fn get_module_links(&self, module_id: RecordId) -> Result<Vec<ModuleEquipment>> {
        self.fetch_by_index("moduleId", &[Value::from(module_id)])
            .await
    }

    /// Equipment linked to a module, in link order. Links whose equipment
    /// no longer exists are skipped.
    pub async fn get_module_equipment(&self, module_id: RecordId) -> Result<Vec<Equipment>> {
        let mut equipment = Vec::new();
        for link in self.get_module_links(module_id).await? {
            if let Some(item) = self.get_equipment(link.equipment_id).await? {
                equipment.push(item);
            }
        }
        Ok(equipment)
    }

    /// Reconciles a module's links to exactly `equipment_ids`: links not in
    /// the set are removed, missing ones are added.
    pub async fn set_module_equipment(
        &self,
        module_id: RecordId,
        equipment_ids: &[RecordId],
    ) -> Result<()> {
        self.ensure_exists(Collection::Modules, module_id).await?;

        let wanted: HashSet<RecordId> = equipment_ids.iter().copied().collect();
        let mut linked = HashSet::new();

        for link in self.get_module_links(module_id).await? {
            if wanted.contains(&link.equipment_id) {
                linked.insert(link.equipment_id);
            } else if let Some(id) = link.id {
                self.engine.delete(Collection::ModuleEquipment, id).await?;
            }
        }

        let mut added = 0;
        for &equipment_id in equipment_ids {
            if linked.insert(equipment_id) {
                self.add_module_equipment(module_id, equipment_id).await?;
                added += 1;
            }
        }

        tracing::debug!(module_id, links = linked.len(), added, "module equipment set");
        Ok(())
    }
}
