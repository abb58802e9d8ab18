use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tokio::io::AsyncReadExt;

use campcheck_core::backup::ImportMode;

use super::Context;
use crate::backup::{BackupError, BackupService, ImportError};
use crate::output::pretty;

pub async fn export(stdout: bool, dir: Option<PathBuf>, ctx: &Context) -> Result<Option<String>> {
    let service = BackupService::new(ctx.repository.clone());

    if stdout {
        return Ok(Some(service.export_json().await?));
    }

    let dir = dir.unwrap_or_else(|| ctx.config.backup_dir.clone());
    let path = service.export_to_dir(&dir).await?;
    let written = serde_json::json!({ "path": path });
    Ok(ctx.notice(ctx.render(&written, |_| {
        format!("Backup written to {}", path.display())
    })))
}

/// Imports from a file, or from stdin when `source` is `-`.
pub async fn import(source: &str, mode: ImportMode, ctx: &Context) -> Result<Option<String>> {
    let service = BackupService::new(ctx.repository.clone());

    let summary = if source == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .map_err(|err| BackupError::Import(ImportError::Io(err)))?;
        service.import_str(&text, mode).await?
    } else {
        service.import_file(Path::new(source), mode).await?
    };

    Ok(ctx.notice(ctx.render(&summary, pretty::format_import_summary)))
}

pub async fn clear(yes: bool, ctx: &Context) -> Result<Option<String>> {
    if !yes {
        bail!("Refusing to delete all data without --yes");
    }
    ctx.repository.clear_all().await?;
    Ok(ctx.notice("All equipment, modules and checklists deleted".to_string()))
}
