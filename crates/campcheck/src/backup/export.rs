use std::path::{Path, PathBuf};

use chrono::Utc;

use campcheck_core::backup::{backup_file_name, BackupDocument};

use super::{BackupError, BackupService, ExportError};

impl BackupService {
    /// Snapshots the whole repository.
    ///
    /// Equipment, modules, checklists and settings are fetched concurrently;
    /// checklist items are then gathered one checklist at a time.
    pub async fn export(&self) -> Result<BackupDocument, BackupError> {
        self.collect().await.map_err(|err| {
            tracing::error!(error = %err, "export failed");
            BackupError::Export(err)
        })
    }

    /// The snapshot as pretty-printed JSON, for a file or the clipboard.
    pub async fn export_json(&self) -> Result<String, BackupError> {
        let document = self.export().await?;
        document.to_pretty_json().map_err(|err| {
            tracing::error!(error = %err, "export failed");
            BackupError::Export(err.into())
        })
    }

    /// Writes `campcheck-backup-<date>.json` into `dir` and returns its path.
    pub async fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, BackupError> {
        let json = self.export_json().await?;
        let path = dir.join(backup_file_name(Utc::now().date_naive()));

        tokio::fs::write(&path, json).await.map_err(|err| {
            tracing::error!(error = %err, path = %path.display(), "export failed");
            BackupError::Export(ExportError::Io(err))
        })?;

        tracing::info!(path = %path.display(), "backup written");
        Ok(path)
    }

    async fn collect(&self) -> Result<BackupDocument, ExportError> {
        let repository = &self.repository;
        let (equipment, modules, checklists, settings) = tokio::try_join!(
            repository.get_all_equipment(),
            repository.get_all_modules(),
            repository.get_all_checklists(),
            repository.get_settings(),
        )?;

        let mut checklist_items = Vec::new();
        for checklist in &checklists {
            if let Some(id) = checklist.id {
                checklist_items.extend(repository.get_checklist_items(id).await?);
            }
        }

        let mut document = BackupDocument::new(Utc::now());
        document.equipment = equipment;
        document.modules = modules;
        document.checklists = checklists;
        document.checklist_items = checklist_items;
        document.settings = Some(settings);

        tracing::info!(
            equipment = document.equipment.len(),
            modules = document.modules.len(),
            checklists = document.checklists.len(),
            checklist_items = document.checklist_items.len(),
            "export collected"
        );
        Ok(document)
    }
}
