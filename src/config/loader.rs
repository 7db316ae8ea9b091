use std::env;
use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::types::PanelError;

use super::{paths, Config};

pub const API_URL_ENV: &str = "PANEL_API_URL";

impl Config {
    /// Load configuration from config.json in the app directory
    /// Falls back to defaults if the file doesn't exist or can't be parsed
    pub async fn load() -> Self {
        let mut config = match paths::get_config_path() {
            Ok(path) => Self::load_from(&path).await,
            Err(err) => {
                warn!(error = ?err, "Failed to locate config.json, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();

        info!(
            api = %config.api_base_url,
            refresh_ms = config.refresh_interval_ms,
            health_ms = config.health_interval_ms,
            "Loaded configuration"
        );
        config
    }

    /// Load configuration from an explicit path, falling back to defaults.
    pub async fn load_from(path: &Path) -> Self {
        match Self::try_load(path).await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = ?err, "Failed to load config.json, using defaults");
                Self::default()
            }
        }
    }

    async fn try_load(config_path: &Path) -> Result<Self, PanelError> {
        if !config_path.exists() {
            warn!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(config_path)
            .await
            .map_err(|err| PanelError::Config(format!("Failed to read config file: {err}")))?;

        serde_json::from_str(&contents)
            .map_err(|err| PanelError::Config(format!("Failed to parse config.json: {err}")))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(custom) = env::var(API_URL_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                self.api_base_url = trimmed.to_string();
            }
        }
    }
}
