//! Pretty output formatting.

use campcheck_core::inventory::{
    checklist_progress, Checklist, ChecklistItemDetail, Equipment, Module, Settings,
};

use crate::backup::ImportSummary;

fn id_str(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Format a piece of equipment for display.
pub fn format_equipment(equipment: &Equipment) -> String {
    let mut output = format!(
        "{} x{}\n  ID: {}\n  Category: {}\n  Status: {}",
        equipment.name,
        equipment.quantity,
        id_str(equipment.id),
        equipment.category,
        equipment.status.label()
    );
    if !equipment.kind.is_empty() {
        output.push_str(&format!("\n  Type: {}", equipment.kind));
    }
    if equipment.is_consumable {
        output.push_str("\n  Consumable");
    }
    if let Some(memo) = &equipment.memo {
        output.push_str(&format!("\n  Memo: {}", memo));
    }
    output
}

/// Format equipment for display.
pub fn format_equipment_list(equipment: &[Equipment]) -> String {
    if equipment.is_empty() {
        return "No equipment found.".to_string();
    }
    let mut output = format!("EQUIPMENT ({})\n", equipment.len());
    output.push_str(&"-".repeat(40));
    for item in equipment {
        output.push_str(&format!("\n{}", format_equipment(item)));
        output.push('\n');
    }
    output
}

pub fn format_module(module: &Module) -> String {
    format!(
        "{}\n  ID: {}\n  Sort order: {}",
        module.name,
        id_str(module.id),
        module.sort_order
    )
}

/// Format a module followed by its equipment.
pub fn format_module_detail(module: &Module, equipment: &[Equipment]) -> String {
    let mut output = format_module(module);
    if equipment.is_empty() {
        output.push_str("\n  (no equipment)");
    }
    for item in equipment {
        output.push_str(&format!(
            "\n  - [{}] {} x{}",
            id_str(item.id),
            item.name,
            item.quantity
        ));
    }
    output
}

pub fn format_modules(modules: &[Module]) -> String {
    if modules.is_empty() {
        return "No modules found.".to_string();
    }
    let mut output = format!("MODULES ({})\n", modules.len());
    output.push_str(&"-".repeat(40));
    for module in modules {
        output.push_str(&format!("\n{}", format_module(module)));
        output.push('\n');
    }
    output
}

pub fn format_checklist(checklist: &Checklist) -> String {
    format!(
        "{}\n  ID: {}\n  Dates: {} to {}",
        checklist.name,
        id_str(checklist.id),
        checklist.start_date,
        checklist.end_date
    )
}

pub fn format_checklists(checklists: &[Checklist]) -> String {
    if checklists.is_empty() {
        return "No checklists found.".to_string();
    }
    let mut output = format!("CHECKLISTS ({})\n", checklists.len());
    output.push_str(&"-".repeat(40));
    for checklist in checklists {
        output.push_str(&format!("\n{}", format_checklist(checklist)));
        output.push('\n');
    }
    output
}

/// Format a checklist with its items and packing progress.
pub fn format_checklist_detail(checklist: &Checklist, details: &[ChecklistItemDetail]) -> String {
    let items: Vec<_> = details.iter().map(|detail| detail.item.clone()).collect();
    let progress = checklist_progress(&items);

    let mut output = format_checklist(checklist);
    output.push_str(&format!(
        "\n  Packed: {}/{} ({}%)",
        progress.checked,
        progress.total,
        progress.percent()
    ));
    if progress.is_complete() {
        output.push_str(" - all packed");
    }
    for detail in details {
        let mark = if detail.item.is_checked { "x" } else { " " };
        let name = detail
            .equipment
            .as_ref()
            .map(|e| e.name.as_str())
            .unwrap_or("(deleted equipment)");
        output.push_str(&format!(
            "\n  [{}] {} x{} (item {})",
            mark,
            name,
            detail.item.quantity,
            id_str(detail.item.id)
        ));
    }
    output
}

pub fn format_settings(settings: &Settings) -> String {
    format!(
        "Settings\n  Dark mode: {}\n  Notifications: {}",
        on_off(settings.dark_mode),
        on_off(settings.notifications)
    )
}

pub fn format_import_summary(summary: &ImportSummary) -> String {
    let mut output = format!(
        "Imported {} equipment, {} modules, {} checklists, {} checklist items",
        summary.equipment, summary.modules, summary.checklists, summary.checklist_items
    );
    if summary.dropped_items > 0 {
        output.push_str(&format!(
            "\n  Skipped {} items without a checklist",
            summary.dropped_items
        ));
    }
    if summary.settings_applied {
        output.push_str("\n  Settings restored");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use campcheck_core::inventory::{ChecklistItem, EquipmentStatus};

    #[test]
    fn test_format_equipment() {
        let tent = Equipment::new("2-person tent", "Tent/Tarp")
            .with_kind("dome")
            .with_status(EquipmentStatus::NeedsReplacement)
            .with_id(3);

        let output = format_equipment(&tent);

        assert!(output.starts_with("2-person tent x1"));
        assert!(output.contains("ID: 3"));
        assert!(output.contains("Status: Needs replacement"));
        assert!(output.contains("Type: dome"));
        assert!(!output.contains("Memo"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_equipment_list(&[]), "No equipment found.");
        assert_eq!(format_modules(&[]), "No modules found.");
        assert_eq!(format_checklists(&[]), "No checklists found.");
    }

    #[test]
    fn test_format_checklist_detail_shows_progress() {
        let checklist = Checklist::new("July Trip", "2024-07-01", "2024-07-03").with_id(1);
        let mut packed = ChecklistItem::new(1, 2, 1);
        packed.is_checked = true;
        let details = vec![
            ChecklistItemDetail {
                item: packed,
                equipment: Some(Equipment::new("Tent", "Tent/Tarp").with_id(2)),
            },
            ChecklistItemDetail {
                item: ChecklistItem::new(1, 9, 2),
                equipment: None,
            },
        ];

        let output = format_checklist_detail(&checklist, &details);

        assert!(output.contains("Packed: 1/2 (50%)"));
        assert!(output.contains("[x] Tent x1"));
        assert!(output.contains("[ ] (deleted equipment) x2"));
        assert!(!output.contains("all packed"));
    }

    #[test]
    fn test_format_checklist_detail_marks_complete() {
        let checklist = Checklist::new("July Trip", "2024-07-01", "2024-07-03").with_id(1);
        let mut packed = ChecklistItem::new(1, 2, 1);
        packed.is_checked = true;
        let details = vec![ChecklistItemDetail {
            item: packed,
            equipment: None,
        }];

        let output = format_checklist_detail(&checklist, &details);

        assert!(output.contains("Packed: 1/1 (100%) - all packed"));
    }

    #[test]
    fn test_format_import_summary() {
        let summary = ImportSummary {
            equipment: 2,
            dropped_items: 1,
            ..ImportSummary::default()
        };

        let output = format_import_summary(&summary);

        assert!(output.starts_with("Imported 2 equipment, 0 modules"));
        assert!(output.contains("Skipped 1 items"));
        assert!(!output.contains("Settings restored"));
    }
}
