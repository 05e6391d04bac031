//! Local replay ingester
//!
//! Reads provider records from a JSON Lines file instead of a provider API
//! and writes them to per-media-type TSV stores. Useful for exercising the
//! task helpers end to end without network access.
//!
//! Setting `skip_ingestion_errors` in the dag run conf makes malformed lines
//! a warning instead of a failure.

use anyhow::{Context, Result};
use openverse_catalog_core::providers::{default_image_category, sub_provider_for};
use openverse_catalog_core::MediaType;
use openverse_catalog_factory::{DagRun, MediaStore, MediaStores, ProviderDataIngester};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{info, warn};

/// One record as found in the replay file
#[derive(Debug, Deserialize)]
pub struct ReplayRecord {
    pub media_type: MediaType,
    pub foreign_identifier: String,
    pub foreign_landing_url: String,
    pub url: String,
    pub license: String,
    #[serde(default)]
    pub license_version: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Provider-specific identifier used to resolve a sub-provider
    /// (Flickr owner id, Smithsonian unit code, ...)
    #[serde(default)]
    pub source_id: Option<String>,
}

impl ReplayRecord {
    /// TSV columns, in store order
    fn columns(&self, provider: &str) -> [String; 10] {
        let source = self
            .source_id
            .as_deref()
            .and_then(|id| sub_provider_for(provider, id))
            .unwrap_or(provider);
        let category = match self.media_type {
            MediaType::Image => default_image_category(source)
                .or_else(|| default_image_category(provider))
                .map(|c| c.as_str())
                .unwrap_or(""),
            MediaType::Audio => "",
        };

        [
            self.foreign_identifier.clone(),
            self.foreign_landing_url.clone(),
            self.url.clone(),
            self.license.clone(),
            self.license_version.clone().unwrap_or_default(),
            self.creator.clone().unwrap_or_default(),
            self.title.clone().unwrap_or_default(),
            provider.to_string(),
            source.to_string(),
            category.to_string(),
        ]
    }
}

/// Constructor arguments for [`ReplayIngester`]
#[derive(Debug, Clone)]
pub struct ReplayArgs {
    pub provider: String,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub media_types: Vec<MediaType>,
    pub buffer_length: usize,
}

/// Dag run conf key that turns malformed records into warnings
pub const SKIP_INGESTION_ERRORS: &str = "skip_ingestion_errors";

pub struct ReplayIngester {
    provider: String,
    input: PathBuf,
    stores: MediaStores,
    skip_ingestion_errors: bool,
}

impl ReplayIngester {
    pub fn new(dag_run: &DagRun, args: ReplayArgs) -> Result<Self> {
        if args.media_types.is_empty() {
            anyhow::bail!("at least one media type is required");
        }

        let mut stores = MediaStores::new();
        for media_type in &args.media_types {
            stores.insert(
                MediaStore::for_dag_run(&args.provider, *media_type, &args.output_dir, dag_run)
                    .with_buffer_length(args.buffer_length),
            );
        }

        let skip_ingestion_errors = dag_run
            .conf
            .get(SKIP_INGESTION_ERRORS)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        Ok(Self {
            provider: args.provider,
            input: args.input,
            stores,
            skip_ingestion_errors,
        })
    }
}

impl ProviderDataIngester for ReplayIngester {
    fn media_stores(&self) -> &MediaStores {
        &self.stores
    }

    fn media_stores_mut(&mut self) -> &mut MediaStores {
        &mut self.stores
    }

    fn ingest_records(&mut self) -> Result<()> {
        let file = File::open(&self.input)
            .with_context(|| format!("Failed to open replay file: {}", self.input.display()))?;

        let mut skipped = 0usize;
        let mut invalid = 0usize;
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_no = index + 1;
            let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
            if line.trim().is_empty() {
                continue;
            }

            let record: ReplayRecord = match serde_json::from_str(&line) {
                Ok(record) => record,
                Err(e) if self.skip_ingestion_errors => {
                    invalid += 1;
                    warn!(line = line_no, error = %e, "Skipping invalid record");
                    continue;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Invalid record on line {}", line_no));
                }
            };

            match self.stores.get_mut(record.media_type) {
                Some(store) => {
                    store.add_record(record.columns(&self.provider))?;
                }
                None => {
                    skipped += 1;
                    warn!(
                        line = line_no,
                        media_type = %record.media_type,
                        "No store for media type, skipping record"
                    );
                }
            }
        }

        let total = self.stores.commit_all()?;
        info!(
            provider = %self.provider,
            total_records = total,
            skipped,
            invalid,
            "Replay ingestion complete"
        );
        Ok(())
    }
}
