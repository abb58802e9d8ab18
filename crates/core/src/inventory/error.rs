use thiserror::Error;

/// Errors that can occur when validating equipment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EquipmentError {
    #[error("Equipment name cannot be empty")]
    EmptyName,
    #[error("Equipment name too long (max 100 characters)")]
    NameTooLong,
    #[error("Quantity must be at least 1")]
    ZeroQuantity,
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Unknown equipment status: {0}")]
    UnknownStatus(String),
}

/// Errors that can occur when validating modules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModuleError {
    #[error("Module name cannot be empty")]
    EmptyName,
    #[error("Module name too long (max 100 characters)")]
    NameTooLong,
}

/// Errors that can occur when validating checklists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChecklistError {
    #[error("Checklist name cannot be empty")]
    EmptyName,
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("End date must be after or equal to start date")]
    InvalidDateRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_error_display() {
        assert_eq!(
            EquipmentError::ZeroQuantity.to_string(),
            "Quantity must be at least 1"
        );
        assert_eq!(
            EquipmentError::UnknownStatus("broken".to_string()).to_string(),
            "Unknown equipment status: broken"
        );
    }

    #[test]
    fn test_checklist_error_display() {
        assert_eq!(
            ChecklistError::InvalidDate("07/01/2024".to_string()).to_string(),
            "Invalid date (expected YYYY-MM-DD): 07/01/2024"
        );
        assert_eq!(
            ChecklistError::InvalidDateRange.to_string(),
            "End date must be after or equal to start date"
        );
    }
}
