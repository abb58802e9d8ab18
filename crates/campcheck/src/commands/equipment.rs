use anyhow::{anyhow, Result};

use campcheck_core::inventory::{validate_equipment, Equipment, DEFAULT_CATEGORIES};

use super::Context;
use crate::cli::equipment::EquipmentAction;
use crate::output::pretty;

pub async fn run(action: EquipmentAction, ctx: &Context) -> Result<Option<String>> {
    let repository = &ctx.repository;

    match action {
        EquipmentAction::List { category, status } => {
            let equipment = match (category, status) {
                (Some(category), _) => repository.list_equipment_by_category(&category).await?,
                (None, Some(status)) => repository.list_equipment_by_status(status).await?,
                (None, None) => repository.get_all_equipment().await?,
            };
            Ok(Some(ctx.render(equipment.as_slice(), pretty::format_equipment_list)))
        }
        EquipmentAction::Categories => Ok(Some(ctx.render(&DEFAULT_CATEGORIES, |categories| {
            categories.join("\n")
        }))),
        EquipmentAction::Add {
            name,
            category,
            kind,
            quantity,
            consumable,
            status,
            memo,
        } => {
            let mut equipment = Equipment::new(name.trim(), category.trim())
                .with_kind(kind)
                .with_quantity(quantity)
                .with_status(status);
            equipment.is_consumable = consumable;
            equipment.memo = memo;
            validate_equipment(&equipment)?;

            let id = repository.add_equipment(&equipment).await?;
            let stored = equipment.with_id(id);
            Ok(Some(ctx.render(&stored, |e| {
                format!("Created:\n{}", pretty::format_equipment(e))
            })))
        }
        EquipmentAction::Update {
            id,
            name,
            category,
            kind,
            quantity,
            consumable,
            status,
            memo,
        } => {
            let mut equipment = repository
                .get_equipment(id)
                .await?
                .ok_or_else(|| anyhow!("Equipment {id} not found"))?;
            if let Some(name) = name {
                equipment.name = name.trim().to_string();
            }
            if let Some(category) = category {
                equipment.category = category.trim().to_string();
            }
            if let Some(kind) = kind {
                equipment.kind = kind;
            }
            if let Some(quantity) = quantity {
                equipment.quantity = quantity;
            }
            if let Some(consumable) = consumable {
                equipment.is_consumable = consumable;
            }
            if let Some(status) = status {
                equipment.status = status;
            }
            if memo.is_some() {
                equipment.memo = memo.filter(|m| !m.is_empty());
            }
            validate_equipment(&equipment)?;

            repository.update_equipment(&equipment).await?;
            Ok(Some(ctx.render(&equipment, |e| {
                format!("Updated:\n{}", pretty::format_equipment(e))
            })))
        }
        EquipmentAction::Delete { id } => {
            repository.delete_equipment(id).await?;
            Ok(ctx.notice(format!("Deleted equipment {id}")))
        }
    }
}
