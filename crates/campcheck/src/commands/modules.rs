use anyhow::{anyhow, bail, Result};
use serde::Serialize;

use campcheck_core::inventory::{next_sort_order, validate_module, Equipment, Module};

use super::Context;
use crate::cli::modules::ModulesAction;
use crate::output::pretty;

#[derive(Serialize)]
struct ModuleDetail {
    #[serde(flatten)]
    module: Module,
    equipment: Vec<Equipment>,
}

pub async fn run(action: ModulesAction, ctx: &Context) -> Result<Option<String>> {
    let repository = &ctx.repository;

    match action {
        ModulesAction::List => {
            let modules = repository.get_all_modules().await?;
            Ok(Some(ctx.render(modules.as_slice(), pretty::format_modules)))
        }
        ModulesAction::Add {
            name,
            sort_order,
            equipment_ids,
        } => {
            let sort_order = match sort_order {
                Some(order) => order,
                None => next_sort_order(&repository.get_all_modules().await?),
            };
            let module = Module::new(name.trim(), sort_order);
            validate_module(&module)?;
            for &equipment_id in &equipment_ids {
                if repository.get_equipment(equipment_id).await?.is_none() {
                    bail!("Equipment {equipment_id} not found");
                }
            }

            let id = repository.add_module(&module).await?;
            if !equipment_ids.is_empty() {
                repository.set_module_equipment(id, &equipment_ids).await?;
            }
            let stored = module.with_id(id);
            Ok(Some(ctx.render(&stored, |m| {
                format!("Created:\n{}", pretty::format_module(m))
            })))
        }
        ModulesAction::Show { id } => {
            let module = repository
                .get_module(id)
                .await?
                .ok_or_else(|| anyhow!("Module {id} not found"))?;
            let detail = ModuleDetail {
                equipment: repository.get_module_equipment(id).await?,
                module,
            };
            Ok(Some(ctx.render(&detail, |d| {
                pretty::format_module_detail(&d.module, &d.equipment)
            })))
        }
        ModulesAction::Update {
            id,
            name,
            sort_order,
        } => {
            let mut module = repository
                .get_module(id)
                .await?
                .ok_or_else(|| anyhow!("Module {id} not found"))?;
            if let Some(name) = name {
                module.name = name.trim().to_string();
            }
            if let Some(sort_order) = sort_order {
                module.sort_order = sort_order;
            }
            validate_module(&module)?;

            repository.update_module(&module).await?;
            Ok(Some(ctx.render(&module, |m| {
                format!("Updated:\n{}", pretty::format_module(m))
            })))
        }
        ModulesAction::Link {
            module_id,
            equipment_id,
        } => {
            repository
                .add_module_equipment(module_id, equipment_id)
                .await?;
            Ok(ctx.notice(format!(
                "Linked equipment {equipment_id} to module {module_id}"
            )))
        }
        ModulesAction::Unlink {
            module_id,
            equipment_id,
        } => {
            repository
                .remove_module_equipment(module_id, equipment_id)
                .await?;
            Ok(ctx.notice(format!(
                "Unlinked equipment {equipment_id} from module {module_id}"
            )))
        }
        ModulesAction::SetEquipment {
            module_id,
            equipment_ids,
        } => {
            repository
                .set_module_equipment(module_id, &equipment_ids)
                .await?;
            Ok(ctx.notice(format!(
                "Module {module_id} now has {} equipment",
                repository.get_module_links(module_id).await?.len()
            )))
        }
        ModulesAction::Delete { id } => {
            repository.delete_module(id).await?;
            Ok(ctx.notice(format!("Deleted module {id}")))
        }
    }
}
