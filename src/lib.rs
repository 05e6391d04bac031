// Openverse catalog - ingestion task helpers
//
// Ties together the provider tables, configuration and the task helpers:
// - Partition prefixes for a schedule and logical date
// - Provider / sub-provider lookups
// - Local replay ingestion driven through the same two task entry points
//   a workflow engine would call (filename generation, then ingestion)

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use openverse_catalog_config::CatalogConfig;
use openverse_catalog_core::{MediaType, Schedule};
use openverse_catalog_factory::{
    generate_tsv_filenames, pull_media_wrapper, DagRun, MediaTypes, RecordingXCom, XComPush,
};
use std::path::{Path, PathBuf};
use tracing::info;

mod init;
pub mod replay;

pub use init::init_tracing;
use replay::{ReplayArgs, ReplayIngester, SKIP_INGESTION_ERRORS};

/// Apply command-line overrides on top of a loaded config and re-validate
pub fn apply_cli_overrides(
    config: &mut CatalogConfig,
    log_level: Option<&str>,
    output_dir: Option<&Path>,
) -> Result<()> {
    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }
    if let Some(output_dir) = output_dir {
        config.storage.output_dir = output_dir.to_string_lossy().to_string();
    }
    config
        .validate()
        .context("Invalid configuration after command-line overrides")
}

/// Parse a logical date given either as RFC 3339 or as a plain `YYYY-MM-DD`
pub fn parse_logical_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").with_context(|| {
        format!("Invalid logical date '{}': expected RFC 3339 or YYYY-MM-DD", value)
    })?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .with_context(|| format!("Invalid logical date '{}'", value))
}

/// A local ingestion run
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub provider: String,
    pub input: PathBuf,
    pub media_types: Vec<MediaType>,
    pub logical_date: DateTime<Utc>,
    pub schedule: Option<Schedule>,
    pub reingestion_date: Option<String>,
    /// Warn about malformed records instead of failing the run
    pub skip_ingestion_errors: bool,
}

/// Run the filename and ingestion tasks for a replay file.
///
/// Returns every XCom push, filename pushes first and the duration last.
pub fn run_ingest(config: &CatalogConfig, request: IngestRequest) -> Result<Vec<XComPush>> {
    let mut dag_run = DagRun::new(format!("{}_workflow", request.provider), request.logical_date);
    dag_run.schedule = request.schedule;
    dag_run.reingestion_date = request.reingestion_date;
    if request.skip_ingestion_errors {
        dag_run
            .conf
            .insert(SKIP_INGESTION_ERRORS.to_string(), true.into());
    }

    let args = ReplayArgs {
        provider: request.provider,
        input: request.input,
        output_dir: PathBuf::from(&config.storage.output_dir),
        media_types: request.media_types.clone(),
        buffer_length: config.storage.buffer_length,
    };
    let media_types = MediaTypes::Named(request.media_types);
    let factory = ReplayIngester::new;

    let mut ti = RecordingXCom::new();
    generate_tsv_filenames(&factory, &media_types, &mut ti, &dag_run, args.clone())
        .context("Failed to generate TSV filenames")?;

    // Downstream task pulls the filenames pushed above
    let filenames: Vec<String> = ti
        .pushes()
        .iter()
        .filter_map(|push| push.value.as_str().map(str::to_string))
        .collect();
    info!(
        dag_id = %dag_run.dag_id,
        partition = %dag_run.partition_prefix(),
        files = filenames.len(),
        "Starting replay ingestion"
    );

    let result = pull_media_wrapper(&factory, &media_types, &filenames, &mut ti, &dag_run, args);
    match result {
        Ok(()) => Ok(ti.into_pushes()),
        Err(e) => Err(e.context(format!("Ingestion failed for {}", dag_run.dag_id))),
    }
}
