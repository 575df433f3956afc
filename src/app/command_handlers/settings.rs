use crate::config::{default_config_path, ClientSettings};

pub fn cmd_config(settings: ClientSettings) -> Result<String, String> {
    let path = default_config_path().map_err(|e| e.to_string())?;
    Ok([
        format!("config_path={}", path.display()),
        format!("config_file_present={}", path.exists()),
        format!("api_base_url={}", settings.resolved_api_base_url()),
        format!("asset_base_url={}", settings.resolved_asset_base_url()),
        format!("log_filter={}", settings.log_filter),
    ]
    .join("\n"))
}
