pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_client_settings, load_client_settings_from};
pub use paths::{default_config_path, CONFIG_FILE_NAME, GLOBAL_STATE_DIR};
pub use settings::{
    ClientSettings, API_URL_ENV, ASSET_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_LOG_FILTER,
};
