use anyhow::Result;

use super::Context;
use crate::cli::settings::SettingsAction;
use crate::output::pretty;

pub async fn run(action: SettingsAction, ctx: &Context) -> Result<Option<String>> {
    let repository = &ctx.repository;

    match action {
        SettingsAction::Show => {
            let settings = repository.get_settings().await?;
            Ok(Some(ctx.render(&settings, pretty::format_settings)))
        }
        SettingsAction::Set {
            dark_mode,
            notifications,
        } => {
            let mut settings = repository.get_settings().await?;
            if let Some(dark_mode) = dark_mode {
                settings.dark_mode = dark_mode;
            }
            if let Some(notifications) = notifications {
                settings.notifications = notifications;
            }
            repository.update_settings(settings).await?;
            Ok(Some(ctx.render(&settings, pretty::format_settings)))
        }
    }
}
