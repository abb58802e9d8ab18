use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EquipmentError;
use crate::storage::{Collection, Record, RecordId};

/// Fixed identifier of the settings singleton.
pub const SETTINGS_ID: RecordId = 1;

/// Categories offered by default. Category is free text, so this list is
/// a starting point rather than a closed set.
pub const DEFAULT_CATEGORIES: [&str; 13] = [
    "Tent/Tarp",
    "Bedding",
    "Cookware",
    "Lighting",
    "Fire/Heating",
    "Table/Chair",
    "Storage",
    "Clothing",
    "Hygiene",
    "Safety/First Aid",
    "Recreation",
    "Electronics",
    "Other",
];

/// Condition of a piece of equipment.
///
/// Older backups encode the status as a traffic-light color; those names
/// are still accepted when reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentStatus {
    #[default]
    #[serde(alias = "green")]
    Normal,
    #[serde(alias = "yellow")]
    NeedsReplacement,
    #[serde(alias = "red")]
    NeedsPurchase,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 3] = [
        EquipmentStatus::Normal,
        EquipmentStatus::NeedsReplacement,
        EquipmentStatus::NeedsPurchase,
    ];

    /// Stored and serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Normal => "normal",
            EquipmentStatus::NeedsReplacement => "needs-replacement",
            EquipmentStatus::NeedsPurchase => "needs-purchase",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Normal => "Normal",
            EquipmentStatus::NeedsReplacement => "Needs replacement",
            EquipmentStatus::NeedsPurchase => "Needs purchase",
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentStatus {
    type Err = EquipmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "green" => Ok(EquipmentStatus::Normal),
            "needs-replacement" | "yellow" => Ok(EquipmentStatus::NeedsReplacement),
            "needs-purchase" | "red" => Ok(EquipmentStatus::NeedsPurchase),
            other => Err(EquipmentError::UnknownStatus(other.to_string())),
        }
    }
}

/// A single trackable gear item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Free-text kind label, distinct from `category` (e.g. "dome tent").
    #[serde(rename = "type", default)]
    pub kind: String,
    pub name: String,
    pub quantity: u32,
    pub category: String,
    #[serde(default)]
    pub is_consumable: bool,
    #[serde(default)]
    pub status: EquipmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Equipment {
    /// Creates a single, non-consumable item in normal condition.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: String::new(),
            name: name.into(),
            quantity: 1,
            category: category.into(),
            is_consumable: false,
            status: EquipmentStatus::Normal,
            memo: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_status(mut self, status: EquipmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn consumable(mut self) -> Self {
        self.is_consumable = true;
        self
    }

    /// Sets a specific ID (useful for testing).
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Record for Equipment {
    const COLLECTION: Collection = Collection::Equipment;

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}

/// A named, reusable bundle of equipment used as a checklist template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Module {
    pub fn new(name: impl Into<String>, sort_order: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            sort_order,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Record for Module {
    const COLLECTION: Collection = Collection::Modules;

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}

/// Link between a module and one piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEquipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub module_id: RecordId,
    pub equipment_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ModuleEquipment {
    pub fn new(module_id: RecordId, equipment_id: RecordId) -> Self {
        Self {
            id: None,
            module_id,
            equipment_id,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Record for ModuleEquipment {
    const COLLECTION: Collection = Collection::ModuleEquipment;

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}

/// A dated packing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Checklist {
    pub fn new(
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Record for Checklist {
    const COLLECTION: Collection = Collection::Checklists;

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}

/// One line of a checklist.
///
/// `equipment_id` is not protected by any cascade: deleting the equipment
/// leaves the item pointing at nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub checklist_id: RecordId,
    pub equipment_id: RecordId,
    pub quantity: u32,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ChecklistItem {
    /// Creates an unchecked item.
    pub fn new(checklist_id: RecordId, equipment_id: RecordId, quantity: u32) -> Self {
        Self {
            id: None,
            checklist_id,
            equipment_id,
            quantity,
            is_checked: false,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Record for ChecklistItem {
    const COLLECTION: Collection = Collection::ChecklistItems;

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}

/// A checklist item joined with the equipment it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemDetail {
    #[serde(flatten)]
    pub item: ChecklistItem,
    /// `None` when the equipment has been deleted since.
    pub equipment: Option<Equipment>,
}

/// Application settings, stored as a singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
        }
    }
}

impl Record for Settings {
    const COLLECTION: Collection = Collection::Settings;

    fn id(&self) -> Option<RecordId> {
        Some(SETTINGS_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equipment_serializes_camel_case() {
        let tent = Equipment::new("2-person tent", "Tent/Tarp")
            .with_kind("dome")
            .with_id(4);

        let value = serde_json::to_value(&tent).unwrap();

        assert_eq!(value["type"], json!("dome"));
        assert_eq!(value["isConsumable"], json!(false));
        assert_eq!(value["status"], json!("normal"));
        assert!(value.get("memo").is_none());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_equipment_reads_legacy_status_colors() {
        let equipment: Equipment = serde_json::from_value(json!({
            "id": 1,
            "type": "gas",
            "name": "Butane canister",
            "quantity": 4,
            "category": "Cookware",
            "isConsumable": true,
            "status": "red",
            "createdAt": "2024-11-18T03:12:45.123Z",
            "updatedAt": "2024-11-18T03:12:45.123Z"
        }))
        .unwrap();

        assert_eq!(equipment.status, EquipmentStatus::NeedsPurchase);
        assert!(equipment.created_at.is_some());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "needs-replacement".parse::<EquipmentStatus>().unwrap(),
            EquipmentStatus::NeedsReplacement
        );
        assert_eq!(
            "Yellow".parse::<EquipmentStatus>().unwrap(),
            EquipmentStatus::NeedsReplacement
        );
        assert!("broken".parse::<EquipmentStatus>().is_err());
    }

    #[test]
    fn test_status_display_matches_serialization() {
        for status in EquipmentStatus::ALL {
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                json!(status.to_string())
            );
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(!settings.dark_mode);
        assert!(settings.notifications);
        assert_eq!(settings.id(), Some(SETTINGS_ID));
    }

    #[test]
    fn test_new_checklist_item_is_unchecked() {
        let item = ChecklistItem::new(1, 2, 3);
        assert!(!item.is_checked);
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_item_detail_flattens_item() {
        let detail = ChecklistItemDetail {
            item: ChecklistItem::new(1, 2, 1),
            equipment: None,
        };
        let value = serde_json::to_value(&detail).unwrap();

        assert_eq!(value["checklistId"], json!(1));
        assert_eq!(value["equipment"], json!(null));
    }

    #[test]
    fn test_default_categories_contain_tent() {
        assert!(DEFAULT_CATEGORIES.contains(&"Tent/Tarp"));
        assert_eq!(DEFAULT_CATEGORIES.last(), Some(&"Other"));
    }
}
