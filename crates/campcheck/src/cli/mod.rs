//! CLI command definitions.

pub mod checklists;
pub mod equipment;
pub mod modules;
pub mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use campcheck_core::backup::ImportMode;

/// Inventory and packing lists for camping gear.
#[derive(Debug, Parser)]
#[command(name = "campcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database file.
    #[arg(long, global = true, env = "CAMPCHECK_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Equipment management.
    Equipment(equipment::EquipmentCommand),
    /// Module management.
    Modules(modules::ModulesCommand),
    /// Checklist management.
    Checklists(checklists::ChecklistsCommand),
    /// Application settings.
    Settings(settings::SettingsCommand),
    /// Export all data to a backup file.
    Export {
        /// Print the backup to stdout instead of writing a file.
        #[arg(long)]
        stdout: bool,
        /// Output directory. Overrides `CAMPCHECK_BACKUP_DIR`.
        #[arg(long, conflicts_with = "stdout")]
        dir: Option<PathBuf>,
    },
    /// Import a backup file, or `-` to read stdin.
    Import {
        /// Backup file path.
        source: String,
        /// merge keeps existing data, replace deletes it first.
        #[arg(long, default_value_t = ImportMode::Replace)]
        mode: ImportMode,
    },
    /// Delete all equipment, modules and checklists.
    Clear {
        /// Confirm deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import_defaults_to_replace() {
        let cli = Cli::try_parse_from(["campcheck", "import", "backup.json"]).unwrap();

        match cli.command {
            Commands::Import { source, mode } => {
                assert_eq!(source, "backup.json");
                assert_eq!(mode, ImportMode::Replace);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "campcheck", "export", "--stdout", "--format", "json", "--db", "x.db",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
    }

    #[test]
    fn test_export_stdout_conflicts_with_dir() {
        let result = Cli::try_parse_from(["campcheck", "export", "--stdout", "--dir", "out"]);

        assert!(result.is_err());
    }
}
