use chrono::NaiveDate;
use serde::Serialize;

use super::error::{ChecklistError, EquipmentError, ModuleError};
use super::types::{Checklist, ChecklistItem, Equipment, Module};

const MAX_NAME_LENGTH: usize = 100;

/// Validates an equipment record before it is saved from user input.
pub fn validate_equipment(equipment: &Equipment) -> Result<(), EquipmentError> {
    let name = equipment.name.trim();
    if name.is_empty() {
        return Err(EquipmentError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(EquipmentError::NameTooLong);
    }
    if equipment.quantity == 0 {
        return Err(EquipmentError::ZeroQuantity);
    }
    if equipment.category.trim().is_empty() {
        return Err(EquipmentError::EmptyCategory);
    }
    Ok(())
}

/// Validates a module before it is saved from user input.
pub fn validate_module(module: &Module) -> Result<(), ModuleError> {
    let name = module.name.trim();
    if name.is_empty() {
        return Err(ModuleError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ModuleError::NameTooLong);
    }
    Ok(())
}

/// Validates a checklist before it is saved from user input.
pub fn validate_checklist(checklist: &Checklist) -> Result<(), ChecklistError> {
    if checklist.name.trim().is_empty() {
        return Err(ChecklistError::EmptyName);
    }
    let start = parse_date(&checklist.start_date)?;
    let end = parse_date(&checklist.end_date)?;
    if end < start {
        return Err(ChecklistError::InvalidDateRange);
    }
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate, ChecklistError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ChecklistError::InvalidDate(s.to_string()))
}

/// Sorts modules by `sort_order`. Ties keep their existing relative order.
pub fn sort_modules(modules: &mut [Module]) {
    modules.sort_by_key(|module| module.sort_order);
}

/// Sort order for a newly created module: one past the current maximum,
/// starting at 1.
pub fn next_sort_order(modules: &[Module]) -> i64 {
    modules
        .iter()
        .map(|module| module.sort_order)
        .fold(0, i64::max)
        + 1
}

/// How much of a checklist has been packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    pub checked: usize,
    pub total: usize,
}

impl ChecklistProgress {
    /// Completion as a percentage, 0 for an empty checklist.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.checked * 100) / self.total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.checked == self.total
    }
}

/// Counts checked items.
pub fn checklist_progress(items: &[ChecklistItem]) -> ChecklistProgress {
    ChecklistProgress {
        checked: items.iter().filter(|item| item.is_checked).count(),
        total: items.len(),
    }
}
