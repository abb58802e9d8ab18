use campcheck_core::inventory::{Settings, SETTINGS_ID};
use campcheck_core::storage::{set_document_id, to_document, Collection, Result};

use super::Repository;

impl Repository {
    /// Stored settings, or the defaults if none were ever saved.
    pub async fn get_settings(&self) -> Result<Settings> {
        Ok(self.fetch(SETTINGS_ID).await?.unwrap_or_default())
    }

    /// Saves the settings singleton under its fixed identifier.
    pub async fn update_settings(&self, settings: Settings) -> Result<()> {
        let mut document = to_document(&settings)?;
        set_document_id(&mut document, SETTINGS_ID);
        self.engine.put(Collection::Settings, document).await
    }
}
