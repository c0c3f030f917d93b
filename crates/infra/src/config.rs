//! Process configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use warden_auth::AdminSettings;
use warden_observability::LogFormat;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "WARDEN_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardenConfig {
    #[serde(default)]
    pub admin: AdminSettings,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl WardenConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("failed to parse config JSON")?;
        config.admin.validate().context("invalid admin settings")?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Path named by `WARDEN_CONFIG`, if set and non-blank.
    pub fn env_path() -> Option<PathBuf> {
        std::env::var(CONFIG_ENV)
            .ok()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    /// Load from the file named by `WARDEN_CONFIG`, or fall back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        match Self::env_path() {
            Some(path) => Self::load(path),
            None => {
                tracing::warn!(
                    "{CONFIG_ENV} not set; using built-in admin settings (supervisor '{}')",
                    warden_auth::settings::DEFAULT_SUPERVISOR
                );
                Ok(Self::default())
            }
        }
    }
}
