use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use openverse_catalog::{
    apply_cli_overrides, init_tracing, parse_logical_date, run_ingest, IngestRequest,
};
use openverse_catalog_config::CatalogConfig;
use openverse_catalog_core::providers::{self, user_agent};
use openverse_catalog_core::{date_partition_for_prefix, MediaType, Schedule};
use std::path::PathBuf;

/// Ingestion helpers for the Openverse media catalog
#[derive(Parser)]
#[command(name = "openverse-catalog")]
#[command(version)]
#[command(about = "Ingestion helpers for the Openverse media catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the storage partition prefix for a run
    Prefix {
        /// Schedule preset (@hourly, @daily, ...) or cron expression
        #[arg(short, long)]
        schedule: Option<String>,

        /// Logical date (RFC 3339 or YYYY-MM-DD)
        #[arg(short = 'd', long)]
        logical_date: String,

        /// Date being reingested, appended as a sub-partition
        #[arg(short, long)]
        reingestion_date: Option<String>,
    },
    /// List default providers, or resolve a sub-provider
    Providers {
        /// Provider whose sub-provider table to search
        #[arg(short, long, requires = "identifier")]
        provider: Option<String>,

        /// Source identifier (Flickr owner id, Smithsonian unit code, ...)
        #[arg(short, long, requires = "provider")]
        identifier: Option<String>,
    },
    /// Print the User-Agent sent to provider APIs
    UserAgent,
    /// Replay a JSON Lines file through the filename and ingestion tasks
    Ingest {
        /// Provider name recorded on each row
        #[arg(short, long)]
        provider: String,

        /// JSON Lines file with one record per line
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Media types to ingest (repeatable)
        #[arg(short, long = "media-type", default_value = "image")]
        media_types: Vec<MediaType>,

        /// Logical date (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(short = 'd', long)]
        logical_date: Option<String>,

        /// Schedule preset or cron expression
        #[arg(short, long)]
        schedule: Option<String>,

        /// Date being reingested
        #[arg(short, long)]
        reingestion_date: Option<String>,

        /// Output directory for TSV files (overrides config file)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Warn about malformed records instead of failing
        #[arg(long)]
        skip_ingestion_errors: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CatalogConfig::load().context("Failed to load configuration")?,
    };
    let output = match &cli.command {
        Commands::Ingest { output, .. } => output.as_deref(),
        _ => None,
    };
    apply_cli_overrides(&mut config, cli.log_level.as_deref(), output)?;
    init_tracing(&config);

    match cli.command {
        Commands::Prefix {
            schedule,
            logical_date,
            reingestion_date,
        } => {
            let schedule = schedule.as_deref().map(Schedule::parse);
            let logical_date = parse_logical_date(&logical_date)?;
            println!(
                "{}",
                date_partition_for_prefix(
                    schedule.as_ref(),
                    logical_date,
                    reingestion_date.as_deref()
                )
            );
        }
        Commands::Providers {
            provider,
            identifier,
        } => match (provider, identifier) {
            (Some(provider), Some(identifier)) => {
                match providers::sub_provider_for(&provider, &identifier) {
                    Some(sub_provider) => println!("{}", sub_provider),
                    None => anyhow::bail!(
                        "No {} sub-provider matches '{}'",
                        provider,
                        identifier
                    ),
                }
            }
            _ => {
                for name in providers::DEFAULT_PROVIDERS {
                    println!("{}", name);
                }
            }
        },
        Commands::UserAgent => {
            println!("{}", user_agent(config.provider.contact_email.as_deref()));
        }
        Commands::Ingest {
            provider,
            input,
            media_types,
            logical_date,
            schedule,
            reingestion_date,
            skip_ingestion_errors,
            ..
        } => {
            let logical_date = match logical_date {
                Some(value) => parse_logical_date(&value)?,
                None => chrono::Utc::now(),
            };
            let request = IngestRequest {
                provider,
                input,
                media_types,
                logical_date,
                schedule: schedule.as_deref().map(Schedule::parse),
                reingestion_date,
                skip_ingestion_errors,
            };

            let pushes = run_ingest(&config, request)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&pushes).context("Failed to serialize XComs")?
            );
        }
    }

    Ok(())
}
