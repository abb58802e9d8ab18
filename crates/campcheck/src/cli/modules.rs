//! Module CLI commands.

use clap::{Parser, Subcommand};

use campcheck_core::storage::RecordId;

/// Module management commands.
#[derive(Debug, Parser)]
pub struct ModulesCommand {
    #[command(subcommand)]
    pub action: ModulesAction,
}

/// Available module actions.
#[derive(Debug, Subcommand)]
pub enum ModulesAction {
    /// List modules in display order.
    List,
    /// Add a module. It is placed last unless a sort order is given.
    Add {
        /// Module name.
        #[arg(long)]
        name: String,
        /// Display position.
        #[arg(long)]
        sort_order: Option<i64>,
        /// Equipment to link, repeatable.
        #[arg(long = "equipment")]
        equipment_ids: Vec<RecordId>,
    },
    /// Show a module and its equipment.
    Show {
        /// Module ID.
        id: RecordId,
    },
    /// Rename or reorder a module.
    Update {
        /// Module ID.
        id: RecordId,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New display position.
        #[arg(long)]
        sort_order: Option<i64>,
    },
    /// Link equipment to a module.
    Link {
        /// Module ID.
        module_id: RecordId,
        /// Equipment ID.
        equipment_id: RecordId,
    },
    /// Remove equipment from a module.
    Unlink {
        /// Module ID.
        module_id: RecordId,
        /// Equipment ID.
        equipment_id: RecordId,
    },
    /// Replace a module's equipment with exactly the given set.
    SetEquipment {
        /// Module ID.
        module_id: RecordId,
        /// Equipment IDs.
        equipment_ids: Vec<RecordId>,
    },
    /// Delete a module. Its equipment is kept.
    Delete {
        /// Module ID.
        id: RecordId,
    },
}
