//! CLI configuration.

use anyhow::{Context, Result};
use casa_mail::SenderConfig;
use serde::{Deserialize, Serialize};

/// Default config file looked up next to the working directory.
const DEFAULT_CONFIG_PATH: &str = "casabook.toml";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store snapshot configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Outgoing mail sender identity.
    #[serde(default)]
    pub mail: SenderConfig,
}

/// Where the store snapshot lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file path.
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "casabook.json".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from the given path, the default path, or defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {path}"))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config: {path}"))
    }
}
