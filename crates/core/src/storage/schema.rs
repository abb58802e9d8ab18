//! Collection and index definitions shared by every storage backend.
//!
//! Pure data: backends translate these into their own structures (maps,
//! tables, expression indexes) once, during initialization.

use std::fmt;

/// Schema version. Setup runs once when the stored version is lower.
pub const SCHEMA_VERSION: i64 = 1;

/// A secondary index over one or more fields of a collection's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    /// Record fields forming the key, in order.
    pub key_path: &'static [&'static str],
    pub unique: bool,
}

impl IndexSpec {
    const fn single(name: &'static str, field: &'static [&'static str], unique: bool) -> Self {
        Self {
            name,
            key_path: field,
            unique,
        }
    }
}

const EQUIPMENT_INDEXES: &[IndexSpec] = &[
    IndexSpec::single("category", &["category"], false),
    IndexSpec::single("status", &["status"], false),
];

const MODULE_INDEXES: &[IndexSpec] = &[
    IndexSpec::single("name", &["name"], true),
    IndexSpec::single("sortOrder", &["sortOrder"], false),
];

const MODULE_EQUIPMENT_INDEXES: &[IndexSpec] = &[
    IndexSpec::single("moduleId", &["moduleId"], false),
    IndexSpec::single("equipmentId", &["equipmentId"], false),
    IndexSpec {
        name: "moduleEquipment",
        key_path: &["moduleId", "equipmentId"],
        unique: true,
    },
];

const CHECKLIST_ITEM_INDEXES: &[IndexSpec] = &[
    IndexSpec::single("checklistId", &["checklistId"], false),
    IndexSpec::single("equipmentId", &["equipmentId"], false),
];

/// The named record collections of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Equipment,
    Modules,
    ModuleEquipment,
    Checklists,
    ChecklistItems,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Equipment,
        Collection::Modules,
        Collection::ModuleEquipment,
        Collection::Checklists,
        Collection::ChecklistItems,
        Collection::Settings,
    ];

    /// Store name, also used as the SQLite table name.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Equipment => "equipment",
            Collection::Modules => "modules",
            Collection::ModuleEquipment => "moduleEquipment",
            Collection::Checklists => "checklists",
            Collection::ChecklistItems => "checklistItems",
            Collection::Settings => "settings",
        }
    }

    /// Entity name used in error messages.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Collection::Equipment => "Equipment",
            Collection::Modules => "Module",
            Collection::ModuleEquipment => "ModuleEquipment",
            Collection::Checklists => "Checklist",
            Collection::ChecklistItems => "ChecklistItem",
            Collection::Settings => "Settings",
        }
    }

    /// Whether the store assigns identifiers on add.
    /// Settings is keyed explicitly by its singleton ID.
    pub fn auto_increment(&self) -> bool {
        !matches!(self, Collection::Settings)
    }

    pub fn indexes(&self) -> &'static [IndexSpec] {
        match self {
            Collection::Equipment => EQUIPMENT_INDEXES,
            Collection::Modules => MODULE_INDEXES,
            Collection::ModuleEquipment => MODULE_EQUIPMENT_INDEXES,
            Collection::Checklists => &[],
            Collection::ChecklistItems => CHECKLIST_ITEM_INDEXES,
            Collection::Settings => &[],
        }
    }

    pub fn index(&self, name: &str) -> Option<&'static IndexSpec> {
        self.indexes().iter().find(|index| index.name == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_settings_is_explicitly_keyed() {
        for collection in Collection::ALL {
            assert_eq!(
                collection.auto_increment(),
                collection != Collection::Settings
            );
        }
    }

    #[test]
    fn test_unique_indexes() {
        let unique: Vec<(&str, &str)> = Collection::ALL
            .iter()
            .flat_map(|c| {
                c.indexes()
                    .iter()
                    .filter(|i| i.unique)
                    .map(move |i| (c.name(), i.name))
            })
            .collect();

        assert_eq!(
            unique,
            vec![("modules", "name"), ("moduleEquipment", "moduleEquipment")]
        );
    }

    #[test]
    fn test_composite_index_key_path() {
        let index = Collection::ModuleEquipment
            .index("moduleEquipment")
            .unwrap();
        assert_eq!(index.key_path, &["moduleId", "equipmentId"]);
    }

    #[test]
    fn test_lookup_unknown_index() {
        assert!(Collection::Checklists.index("name").is_none());
        assert!(Collection::Equipment.index("category").is_some());
    }

    #[test]
    fn test_display_uses_store_name() {
        assert_eq!(Collection::ChecklistItems.to_string(), "checklistItems");
    }
}
