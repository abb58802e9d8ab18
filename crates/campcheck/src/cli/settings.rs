//! Settings CLI commands.

use clap::{Parser, Subcommand};

/// Settings commands.
#[derive(Debug, Parser)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

/// Available settings actions.
#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Show current settings.
    Show,
    /// Change settings. Unspecified values are kept.
    Set {
        /// Dark theme.
        #[arg(long)]
        dark_mode: Option<bool>,
        /// Notifications.
        #[arg(long)]
        notifications: Option<bool>,
    },
}
