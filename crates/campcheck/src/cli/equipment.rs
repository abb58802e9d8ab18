//! Equipment CLI commands.

use clap::{Parser, Subcommand};

use campcheck_core::inventory::EquipmentStatus;
use campcheck_core::storage::RecordId;

/// Equipment management commands.
#[derive(Debug, Parser)]
pub struct EquipmentCommand {
    #[command(subcommand)]
    pub action: EquipmentAction,
}

/// Available equipment actions.
#[derive(Debug, Subcommand)]
pub enum EquipmentAction {
    /// List equipment, optionally filtered.
    List {
        /// Only this category.
        #[arg(long, conflicts_with = "status")]
        category: Option<String>,
        /// Only this status (normal, needs-replacement, needs-purchase).
        #[arg(long)]
        status: Option<EquipmentStatus>,
    },
    /// Show the default categories.
    Categories,
    /// Add a piece of equipment.
    Add {
        /// Equipment name.
        #[arg(long)]
        name: String,
        /// Category, e.g. "Tent/Tarp".
        #[arg(long)]
        category: String,
        /// Free-text kind, e.g. "dome".
        #[arg(long = "type", default_value = "")]
        kind: String,
        /// Quantity owned.
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Mark as consumable.
        #[arg(long)]
        consumable: bool,
        /// Condition.
        #[arg(long, default_value_t = EquipmentStatus::Normal)]
        status: EquipmentStatus,
        /// Free-text note.
        #[arg(long)]
        memo: Option<String>,
    },
    /// Update a piece of equipment.
    Update {
        /// Equipment ID.
        id: RecordId,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New category.
        #[arg(long)]
        category: Option<String>,
        /// New kind.
        #[arg(long = "type")]
        kind: Option<String>,
        /// New quantity.
        #[arg(long)]
        quantity: Option<u32>,
        /// Consumable flag.
        #[arg(long)]
        consumable: Option<bool>,
        /// New condition.
        #[arg(long)]
        status: Option<EquipmentStatus>,
        /// New note.
        #[arg(long)]
        memo: Option<String>,
    },
    /// Delete a piece of equipment and its module links.
    Delete {
        /// Equipment ID.
        id: RecordId,
    },
}
