//! Reading the settings file.

use std::path::Path;

use super::{
    ConfigError,
    LoaderSettings,
};

/// Name of the settings file looked up in a table directory.
pub const SETTINGS_FILE_NAME: &str = ".translation-table.json";

/// Loads the settings of the table directory `root`.
///
/// Falls back to [`LoaderSettings::default`] when `root` has no
/// `.translation-table.json`. Loaded settings are validated.
///
/// # Errors
/// - The settings file can't be read
/// - The settings file isn't valid JSON
/// - Validation fails
pub fn load_settings(root: &Path) -> Result<LoaderSettings, ConfigError> {
    let settings = read_settings_file(root)?.unwrap_or_default();
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    Ok(settings)
}

/// Reads the settings file, `None` when there is none.
fn read_settings_file(root: &Path) -> Result<Option<LoaderSettings>, ConfigError> {
    let config_path = root.join(SETTINGS_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "Settings file not found");
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "Loading settings");

    let content = std::fs::read_to_string(&config_path)?;
    let settings: LoaderSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
