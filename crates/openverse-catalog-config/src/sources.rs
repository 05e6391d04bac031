// Configuration source loading.
//
// Priority order:
// 1. Environment variables (OPENVERSE_CATALOG_* prefix, plus CONTACT_EMAIL)
// 2. Config file path from OPENVERSE_CATALOG_CONFIG
// 3. Inline config content from OPENVERSE_CATALOG_CONFIG_CONTENT
// 4. Default config files (./catalog.toml, ./.openverse-catalog.toml)
// 5. Built-in defaults

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::CatalogConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;

const DEFAULT_CONFIG_PATHS: &[&str] = &["./catalog.toml", "./.openverse-catalog.toml"];

/// Load configuration using native environment/file access.
pub fn load_config() -> Result<CatalogConfig> {
    let mut config = load_from_file()?.unwrap_or_default();

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

fn load_from_file() -> Result<Option<CatalogConfig>> {
    if let Ok(path) = env::var("OPENVERSE_CATALOG_CONFIG") {
        return read_config_file(Path::new(&path)).map(Some);
    }

    if let Ok(content) = env::var("OPENVERSE_CATALOG_CONFIG_CONTENT") {
        let config: CatalogConfig = toml::from_str(&content)
            .context("Failed to parse inline config from OPENVERSE_CATALOG_CONFIG_CONTENT")?;
        return Ok(Some(config));
    }

    for path in DEFAULT_CONFIG_PATHS {
        let path = Path::new(path);
        if path.exists() {
            return read_config_file(path).map(Some);
        }
    }

    Ok(None)
}

/// Load configuration from a specific file path (for the CLI --config flag).
/// Returns error if the file doesn't exist or can't be parsed.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<CatalogConfig> {
    let mut config = read_config_file(path.as_ref())?;

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<CatalogConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}
