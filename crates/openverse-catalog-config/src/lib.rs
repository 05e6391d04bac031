// openverse-catalog-config - Configuration for the ingestion helpers
//
// Supports configuration from multiple sources:
// 1. Environment variables (highest priority)
// 2. Config file path from OPENVERSE_CATALOG_CONFIG env var
// 3. Config file contents from OPENVERSE_CATALOG_CONFIG_CONTENT env var
// 4. Default config file locations (./catalog.toml, ./.openverse-catalog.toml)
// 5. Built-in defaults (lowest priority)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{apply_env_overrides, EnvSource, ENV_PREFIX};

/// Main catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Where media stores write their TSV output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub output_dir: String,
    /// Records held in memory by a media store before it flushes to disk
    #[serde(default = "default_buffer_length")]
    pub buffer_length: usize,
}

fn default_buffer_length() -> usize {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
            buffer_length: default_buffer_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Settings shared by provider API scripts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Contact address embedded in the User-Agent header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl CatalogConfig {
    /// Load configuration from all sources with priority
    pub fn load() -> Result<Self> {
        sources::load_config()
    }

    /// Load from an explicit file, then apply environment overrides
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        sources::load_from_file_path(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}
