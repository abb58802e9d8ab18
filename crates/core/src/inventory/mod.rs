mod error;
mod operations;
mod types;

pub use error::{ChecklistError, EquipmentError, ModuleError};
pub use operations::{
    checklist_progress, next_sort_order, sort_modules,
    validate_checklist, validate_equipment, validate_module, ChecklistProgress,
};
pub use types::{
    Checklist, ChecklistItem, ChecklistItemDetail, Equipment, EquipmentStatus, Module,
    ModuleEquipment, Settings, DEFAULT_CATEGORIES, SETTINGS_ID,
};
