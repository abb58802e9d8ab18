//! Command handlers.
//!
//! Each handler runs one CLI action against the repository and returns the
//! text to print, if any. User input is validated here, before it reaches
//! the repository.

mod backup;
mod checklists;
mod equipment;
mod modules;
mod settings;

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use campcheck_core::storage::StorageEngine;

use crate::cli::{Commands, OutputFormat};
use crate::config::Config;
use crate::output::format_output;
use crate::repository::Repository;

/// Everything a handler needs.
pub struct Context {
    pub repository: Repository,
    pub config: Config,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Renders `value` as JSON or with the given pretty formatter.
    fn render<T: Serialize + ?Sized>(&self, value: &T, pretty: impl FnOnce(&T) -> String) -> String {
        match self.format {
            OutputFormat::Json => format_output(&value, self.format),
            OutputFormat::Pretty => pretty(value),
        }
    }

    /// A confirmation line, unless `--quiet`.
    fn notice(&self, message: String) -> Option<String> {
        (!self.quiet).then_some(message)
    }
}

/// Builds the storage engine for `config`.
#[cfg(feature = "sqlite")]
pub fn open_engine(config: &Config) -> Arc<dyn StorageEngine> {
    tracing::debug!(path = %config.db_path.display(), "using SQLite storage");
    Arc::new(crate::storage::SqliteEngine::new(&config.db_path))
}

/// Builds the storage engine for `config`.
#[cfg(not(feature = "sqlite"))]
pub fn open_engine(_config: &Config) -> Arc<dyn StorageEngine> {
    tracing::warn!("built without the sqlite feature; data will not be persisted");
    Arc::new(crate::storage::InMemoryEngine::new())
}

/// Runs one command.
pub async fn execute(command: Commands, ctx: &Context) -> Result<Option<String>> {
    match command {
        Commands::Equipment(cmd) => equipment::run(cmd.action, ctx).await,
        Commands::Modules(cmd) => modules::run(cmd.action, ctx).await,
        Commands::Checklists(cmd) => checklists::run(cmd.action, ctx).await,
        Commands::Settings(cmd) => settings::run(cmd.action, ctx).await,
        Commands::Export { stdout, dir } => backup::export(stdout, dir, ctx).await,
        Commands::Import { source, mode } => backup::import(&source, mode, ctx).await,
        Commands::Clear { yes } => backup::clear(yes, ctx).await,
    }
}
