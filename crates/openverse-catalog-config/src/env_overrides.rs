use super::{CatalogConfig, LogFormat};
use anyhow::{Context, Result};

pub const ENV_PREFIX: &str = "OPENVERSE_CATALOG_";

/// Abstraction over environment-variable lookups so tests and embedding
/// hosts can supply their own source of overrides.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the OPENVERSE_CATALOG_ prefix
    /// Used for variables shared with the rest of the deployment (CONTACT_EMAIL)
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides (highest priority) to the config.
pub fn apply_env_overrides<E: EnvSource>(config: &mut CatalogConfig, env: &E) -> Result<()> {
    // Storage
    if let Some(dir) = get_env_string(env, "OUTPUT_DIR") {
        config.storage.output_dir = dir;
    }
    if let Some(val) = get_env_string(env, "BUFFER_LENGTH") {
        config.storage.buffer_length = val
            .parse()
            .with_context(|| format!("Invalid {}BUFFER_LENGTH value: {}", ENV_PREFIX, val))?;
    }

    // Logging
    if let Some(level) = get_env_string(env, "LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = get_env_string(env, "LOG_FORMAT") {
        config.logging.format = match format.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };
    }

    // Provider settings
    if let Some(email) = env
        .get_raw("CONTACT_EMAIL")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    {
        config.provider.contact_email = Some(email);
    }

    Ok(())
}

fn get_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for MapEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.0
                .get(format!("{}{}", ENV_PREFIX, key).as_str())
                .map(|v| v.to_string())
        }

        fn get_raw(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_env_overrides_win() {
        let env = MapEnv(HashMap::from([
            ("OPENVERSE_CATALOG_OUTPUT_DIR", "/data/tsv"),
            ("OPENVERSE_CATALOG_BUFFER_LENGTH", " 25 "),
            ("OPENVERSE_CATALOG_LOG_FORMAT", "JSON"),
            ("CONTACT_EMAIL", "openverse@wordpress.org"),
        ]));
        let mut config = CatalogConfig::default();
        apply_env_overrides(&mut config, &env).unwrap();

        assert_eq!(config.storage.output_dir, "/data/tsv");
        assert_eq!(config.storage.buffer_length, 25);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.provider.contact_email.as_deref(),
            Some("openverse@wordpress.org")
        );
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let env = MapEnv(HashMap::from([
            ("OPENVERSE_CATALOG_OUTPUT_DIR", "   "),
            ("CONTACT_EMAIL", ""),
        ]));
        let mut config = CatalogConfig::default();
        apply_env_overrides(&mut config, &env).unwrap();

        assert_eq!(config.storage.output_dir, "./output");
        assert!(config.provider.contact_email.is_none());
    }

    #[test]
    fn test_invalid_buffer_length() {
        let env = MapEnv(HashMap::from([("OPENVERSE_CATALOG_BUFFER_LENGTH", "lots")]));
        let mut config = CatalogConfig::default();
        assert!(apply_env_overrides(&mut config, &env).is_err());
    }
}
