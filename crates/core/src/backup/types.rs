use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::BackupFormatError;
use crate::inventory::{Checklist, ChecklistItem, Equipment, Module, Settings};

/// Version string written into every export.
pub const BACKUP_FORMAT_VERSION: &str = "1.0.0";

/// A full snapshot of the repository.
///
/// Module-equipment links are not part of the snapshot; they cannot be
/// restored from a backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub checklist_items: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl BackupDocument {
    /// Creates an empty document stamped with the current format version.
    pub fn new(export_date: DateTime<Utc>) -> Self {
        Self {
            version: BACKUP_FORMAT_VERSION.to_string(),
            export_date: Some(export_date),
            equipment: Vec::new(),
            modules: Vec::new(),
            checklists: Vec::new(),
            checklist_items: Vec::new(),
            settings: None,
        }
    }

    /// Pretty-printed JSON, suitable for a file or the clipboard.
    pub fn to_pretty_json(&self) -> Result<String, BackupFormatError> {
        serde_json::to_string_pretty(self).map_err(|e| BackupFormatError::Invalid(e.to_string()))
    }
}

/// How an import treats data already in the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Keep existing records and add the imported ones.
    Merge,
    /// Delete all equipment, modules and checklists first.
    #[default]
    Replace,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Merge => f.write_str("merge"),
            ImportMode::Replace => f.write_str("replace"),
        }
    }
}

impl FromStr for ImportMode {
    type Err = BackupFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "merge" => Ok(ImportMode::Merge),
            "replace" => Ok(ImportMode::Replace),
            other => Err(BackupFormatError::Invalid(format!(
                "unknown import mode: {other}"
            ))),
        }
    }
}

/// File name for a backup taken on `date`: `campcheck-backup-YYYY-MM-DD.json`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("campcheck-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 18).unwrap();
        assert_eq!(backup_file_name(date), "campcheck-backup-2024-11-18.json");
    }

    #[test]
    fn test_new_document_uses_current_version() {
        let doc = BackupDocument::new(Utc::now());
        assert_eq!(doc.version, BACKUP_FORMAT_VERSION);
        assert!(doc.equipment.is_empty());
    }

    #[test]
    fn test_document_field_names() {
        let export_date = DateTime::parse_from_rfc3339("2024-11-18T03:12:45Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut doc = BackupDocument::new(export_date);
        doc.settings = Some(Settings::default());

        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["version"], json!("1.0.0"));
        assert_eq!(value["exportDate"], json!("2024-11-18T03:12:45Z"));
        assert_eq!(value["checklistItems"], json!([]));
        assert_eq!(
            value["settings"],
            json!({ "darkMode": false, "notifications": true })
        );
    }

    #[test]
    fn test_pretty_json_is_multiline() {
        let text = BackupDocument::new(Utc::now()).to_pretty_json().unwrap();
        assert!(text.contains("\n  \"version\": \"1.0.0\""));
    }

    #[test]
    fn test_import_mode_parsing() {
        assert_eq!("merge".parse::<ImportMode>().unwrap(), ImportMode::Merge);
        assert_eq!(" Replace ".parse::<ImportMode>().unwrap(), ImportMode::Replace);
        assert!("append".parse::<ImportMode>().is_err());
    }

    #[test]
    fn test_import_mode_defaults_to_replace() {
        assert_eq!(ImportMode::default(), ImportMode::Replace);
    }
}
