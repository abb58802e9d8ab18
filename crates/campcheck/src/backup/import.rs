use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use campcheck_core::backup::{parse_backup, BackupDocument, ImportMode};
use campcheck_core::storage::{RecordId, StorageError};

use super::{BackupError, BackupService, ImportError};

/// What an import wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub equipment: usize,
    pub modules: usize,
    pub checklists: usize,
    pub checklist_items: usize,
    /// Items whose checklist was not part of the import.
    pub dropped_items: usize,
    pub settings_applied: bool,
}

/// Old identifier to newly assigned identifier, for one import only.
type IdMap = HashMap<RecordId, RecordId>;

impl BackupService {
    /// Imports backup text (file contents or clipboard).
    ///
    /// The document is checked before anything is deleted or written. Writes
    /// made before a later failure are kept.
    pub async fn import_str(&self, text: &str, mode: ImportMode) -> Result<ImportSummary, BackupError> {
        let result = match parse_backup(text) {
            Ok(document) => self.restore(document, mode).await.map_err(ImportError::from),
            Err(err) => Err(ImportError::from(err)),
        };

        result.map_err(|err| {
            tracing::error!(error = %err, %mode, "import failed");
            BackupError::Import(err)
        })
    }

    pub async fn import_file(&self, path: &Path, mode: ImportMode) -> Result<ImportSummary, BackupError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|err| {
            tracing::error!(error = %err, path = %path.display(), "import failed");
            BackupError::Import(ImportError::Io(err))
        })?;
        self.import_str(&text, mode).await
    }

    async fn restore(
        &self,
        document: BackupDocument,
        mode: ImportMode,
    ) -> Result<ImportSummary, StorageError> {
        let repository = &self.repository;
        let mut summary = ImportSummary::default();

        if mode == ImportMode::Replace {
            repository.clear_all().await?;
        }

        for mut equipment in document.equipment {
            equipment.id = None;
            repository.add_equipment(&equipment).await?;
            summary.equipment += 1;
        }

        let mut module_ids = IdMap::new();
        for mut module in document.modules {
            let old_id = module.id.take();
            let new_id = repository.add_module(&module).await?;
            if let Some(old_id) = old_id {
                module_ids.insert(old_id, new_id);
            }
            summary.modules += 1;
        }

        let mut checklist_ids = IdMap::new();
        for mut checklist in document.checklists {
            let old_id = checklist.id.take();
            let new_id = repository.add_checklist(&checklist).await?;
            if let Some(old_id) = old_id {
                checklist_ids.insert(old_id, new_id);
            }
            summary.checklists += 1;
        }

        for mut item in document.checklist_items {
            let Some(&checklist_id) = checklist_ids.get(&item.checklist_id) else {
                tracing::debug!(checklist_id = item.checklist_id, "dropping unmapped checklist item");
                summary.dropped_items += 1;
                continue;
            };
            item.id = None;
            item.checklist_id = checklist_id;
            repository.add_checklist_item(&item).await?;
            summary.checklist_items += 1;
        }

        if let Some(settings) = document.settings {
            repository.update_settings(settings).await?;
            summary.settings_applied = true;
        }

        tracing::info!(
            %mode,
            equipment = summary.equipment,
            modules = summary.modules,
            checklists = summary.checklists,
            checklist_items = summary.checklist_items,
            dropped_items = summary.dropped_items,
            remapped_modules = module_ids.len(),
            "import complete"
        );
        Ok(summary)
    }
}
