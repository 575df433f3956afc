use super::{default_config_path, ClientSettings, ConfigError};
use std::path::Path;

/// Loads `~/.brandstory/config.yaml` when present, then applies environment
/// overrides. A missing file is not an error.
pub fn load_client_settings() -> Result<ClientSettings, ConfigError> {
    let path = default_config_path()?;
    load_client_settings_from(Some(&path))
}

pub fn load_client_settings_from(path: Option<&Path>) -> Result<ClientSettings, ConfigError> {
    let mut settings = match path {
        Some(path) if path.exists() => ClientSettings::from_path(path)?,
        _ => ClientSettings::default(),
    };
    settings.apply_env_overrides(|key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}
