//! Checklist CLI commands.

use clap::{Parser, Subcommand};

use campcheck_core::storage::RecordId;

/// Checklist management commands.
#[derive(Debug, Parser)]
pub struct ChecklistsCommand {
    #[command(subcommand)]
    pub action: ChecklistsAction,
}

/// Available checklist actions.
#[derive(Debug, Subcommand)]
pub enum ChecklistsAction {
    /// List checklists.
    List,
    /// Create a checklist, optionally filled from a module.
    Create {
        /// Checklist name.
        #[arg(long)]
        name: String,
        /// First day, YYYY-MM-DD.
        #[arg(long)]
        start: String,
        /// Last day, YYYY-MM-DD.
        #[arg(long)]
        end: String,
        /// Module whose equipment becomes the items.
        #[arg(long)]
        module: Option<RecordId>,
    },
    /// Show a checklist with its items.
    Show {
        /// Checklist ID.
        id: RecordId,
    },
    /// Add an item to a checklist.
    AddItem {
        /// Checklist ID.
        checklist_id: RecordId,
        /// Equipment ID.
        equipment_id: RecordId,
        /// Quantity to pack. Defaults to the equipment's quantity.
        #[arg(long)]
        quantity: Option<u32>,
    },
    /// Mark an item as packed.
    Check {
        /// Checklist item ID.
        item_id: RecordId,
    },
    /// Mark an item as not packed.
    Uncheck {
        /// Checklist item ID.
        item_id: RecordId,
    },
    /// Remove an item from its checklist.
    RemoveItem {
        /// Checklist item ID.
        item_id: RecordId,
    },
    /// Delete a checklist and its items.
    Delete {
        /// Checklist ID.
        id: RecordId,
    },
}
