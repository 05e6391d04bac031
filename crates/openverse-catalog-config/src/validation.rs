// Configuration validation
//
// Validates that required fields are present and values are sensible

use crate::*;
use anyhow::{bail, Result};
use tracing::warn;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

pub fn validate_config(config: &CatalogConfig) -> Result<()> {
    validate_storage_config(&config.storage)?;
    validate_logging_config(&config.logging)?;
    validate_provider_config(&config.provider);
    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<()> {
    if config.output_dir.trim().is_empty() {
        bail!("storage.output_dir must not be empty");
    }

    if config.buffer_length == 0 {
        bail!("storage.buffer_length must be greater than 0");
    }

    if config.buffer_length > 100_000 {
        warn!(
            buffer_length = config.buffer_length,
            "storage.buffer_length is very large; may cause memory issues"
        );
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    if config.level.trim().is_empty() {
        bail!("logging.level must not be empty");
    }

    // EnvFilter accepts a bare word as a target name, so check levels first
    for directive in config.level.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let level = directive.rsplit_once('=').map_or(directive, |(_, level)| level);
        if level.parse::<LevelFilter>().is_err() {
            bail!(
                "logging.level '{}' has unknown level '{}' (expected trace, debug, info, warn, error or off)",
                config.level,
                level
            );
        }
    }
    if let Err(e) = EnvFilter::try_new(&config.level) {
        bail!("logging.level '{}' is not a valid filter: {}", config.level, e);
    }
    Ok(())
}

fn validate_provider_config(config: &ProviderConfig) {
    match config.contact_email.as_deref() {
        None => warn!("CONTACT_EMAIL is not set; provider User-Agent will not include a contact"),
        Some(email) if !email.contains('@') => {
            warn!(contact_email = email, "contact email does not look like an address")
        }
        Some(_) => {}
    }
}
