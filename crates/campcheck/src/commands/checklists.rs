use anyhow::{anyhow, Result};
use serde::Serialize;

use campcheck_core::inventory::{
    checklist_progress, validate_checklist, Checklist, ChecklistItem, ChecklistItemDetail,
    ChecklistProgress,
};

use super::Context;
use crate::cli::checklists::ChecklistsAction;
use crate::output::pretty;

#[derive(Serialize)]
struct ChecklistDetail {
    #[serde(flatten)]
    checklist: Checklist,
    progress: ChecklistProgress,
    items: Vec<ChecklistItemDetail>,
}

pub async fn run(action: ChecklistsAction, ctx: &Context) -> Result<Option<String>> {
    let repository = &ctx.repository;

    match action {
        ChecklistsAction::List => {
            let checklists = repository.get_all_checklists().await?;
            Ok(Some(ctx.render(checklists.as_slice(), pretty::format_checklists)))
        }
        ChecklistsAction::Create {
            name,
            start,
            end,
            module,
        } => {
            let checklist = Checklist::new(name.trim(), start.trim(), end.trim());
            validate_checklist(&checklist)?;

            let id = repository.create_checklist(&checklist, module).await?;
            let stored = checklist.with_id(id);
            Ok(Some(ctx.render(&stored, |c| {
                format!("Created:\n{}", pretty::format_checklist(c))
            })))
        }
        ChecklistsAction::Show { id } => {
            let checklist = repository
                .get_checklist(id)
                .await?
                .ok_or_else(|| anyhow!("Checklist {id} not found"))?;
            let items = repository.get_checklist_items_with_equipment(id).await?;
            let plain: Vec<ChecklistItem> = items.iter().map(|d| d.item.clone()).collect();
            let detail = ChecklistDetail {
                checklist,
                progress: checklist_progress(&plain),
                items,
            };
            Ok(Some(ctx.render(&detail, |d| {
                pretty::format_checklist_detail(&d.checklist, &d.items)
            })))
        }
        ChecklistsAction::AddItem {
            checklist_id,
            equipment_id,
            quantity,
        } => {
            let equipment = repository
                .get_equipment(equipment_id)
                .await?
                .ok_or_else(|| anyhow!("Equipment {equipment_id} not found"))?;
            let quantity = quantity.unwrap_or(equipment.quantity);
            if quantity == 0 {
                return Err(anyhow!("Quantity must be at least 1"));
            }

            let id = repository
                .add_checklist_item(&ChecklistItem::new(checklist_id, equipment_id, quantity))
                .await?;
            Ok(ctx.notice(format!(
                "Added {} x{} to checklist {checklist_id} (item {id})",
                equipment.name, quantity
            )))
        }
        ChecklistsAction::Check { item_id } => {
            repository.set_checklist_item_checked(item_id, true).await?;
            Ok(ctx.notice(format!("Checked item {item_id}")))
        }
        ChecklistsAction::Uncheck { item_id } => {
            repository.set_checklist_item_checked(item_id, false).await?;
            Ok(ctx.notice(format!("Unchecked item {item_id}")))
        }
        ChecklistsAction::RemoveItem { item_id } => {
            repository.delete_checklist_item(item_id).await?;
            Ok(ctx.notice(format!("Removed item {item_id}")))
        }
        ChecklistsAction::Delete { id } => {
            repository.delete_checklist(id).await?;
            Ok(ctx.notice(format!("Deleted checklist {id}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use campcheck_core::inventory::Equipment;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::commands::test_support::context;

    fn create(start: &str, end: &str) -> ChecklistsAction {
        ChecklistsAction::Create {
            name: "July Trip".to_string(),
            start: start.to_string(),
            end: end.to_string(),
            module: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_reversed_dates() {
        let ctx = context(OutputFormat::Pretty).await;

        let err = run(create("2024-07-03", "2024-07-01"), &ctx)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "End date must be after or equal to start date"
        );
        assert!(ctx.repository.get_all_checklists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_item_check_and_show() {
        let ctx = context(OutputFormat::Json).await;
        let stove = ctx
            .repository
            .add_equipment(&Equipment::new("Stove", "Cookware").with_quantity(2))
            .await
            .unwrap();
        run(create("2024-07-01", "2024-07-03"), &ctx).await.unwrap();
        run(
            ChecklistsAction::AddItem {
                checklist_id: 1,
                equipment_id: stove,
                quantity: None,
            },
            &ctx,
        )
        .await
        .unwrap();
        run(ChecklistsAction::Check { item_id: 1 }, &ctx)
            .await
            .unwrap();

        let output = run(ChecklistsAction::Show { id: 1 }, &ctx)
            .await
            .unwrap()
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["name"], "July Trip");
        assert_eq!(value["progress"]["checked"], 1);
        assert_eq!(value["items"][0]["quantity"], 2);
        assert_eq!(value["items"][0]["isChecked"], true);
        assert_eq!(value["items"][0]["equipment"]["name"], "Stove");
    }

    #[tokio::test]
    async fn test_quiet_suppresses_notices() {
        let mut ctx = context(OutputFormat::Pretty).await;
        ctx.quiet = true;

        let output = run(ChecklistsAction::Delete { id: 4 }, &ctx).await.unwrap();

        assert_eq!(output, None);
    }
}
