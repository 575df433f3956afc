use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_LOG_FILTER: &str = "brandstory=info";
pub const API_URL_ENV: &str = "BRANDSTORY_API_URL";
pub const ASSET_URL_ENV: &str = "BRANDSTORY_ASSET_URL";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Host that relative image paths are resolved against. Defaults to the
    /// scheme and authority of `api_base_url`.
    #[serde(default)]
    pub asset_base_url: Option<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            asset_base_url: None,
            log_filter: default_log_filter(),
        }
    }
}

impl ClientSettings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = value.trim().to_string();
        }
        if let Some(value) = lookup(ASSET_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.asset_base_url = Some(value.trim().to_string());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("api_base_url", &self.api_base_url)?;
        if let Some(asset_base_url) = &self.asset_base_url {
            validate_http_url("asset_base_url", asset_base_url)?;
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`log_filter` must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolved_api_base_url(&self) -> String {
        self.api_base_url.trim_end_matches('/').to_string()
    }

    pub fn resolved_asset_base_url(&self) -> String {
        match &self.asset_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => url_origin(&self.api_base_url),
        }
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    match rest {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(()),
        _ => Err(ConfigError::Settings(format!(
            "`{field}` must be an absolute http(s) url, got `{value}`"
        ))),
    }
}

fn url_origin(url: &str) -> String {
    let url = url.trim();
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.trim_end_matches('/').to_string();
    };
    let authority = rest.split('/').next().unwrap_or(rest);
    format!("{scheme}://{authority}")
}
