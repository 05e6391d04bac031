//! Task helpers for provider data ingesters.
//!
//! This crate provides the pieces a workflow task needs around a provider
//! ingester: a push-only XCom channel, the dag run description, ordered media
//! stores writing TSV output, and the two task entry points
//! [`generate_tsv_filenames`] and [`pull_media_wrapper`].

mod dag_run;
mod error;
mod factory_utils;
mod ingester;
mod store;
mod xcom;

pub use dag_run::DagRun;
pub use error::{ErrorCode, FactoryError, Result};
pub use factory_utils::{generate_tsv_filenames, pull_media_wrapper, DURATION_KEY};
pub use ingester::{IngesterFactory, ProviderDataIngester};
pub use store::{tsv_output_path, MediaStore, MediaStores, MediaTypes};
pub use xcom::{RecordingXCom, XComChannel, XComPush};

// Re-export commonly used types for convenience
pub use openverse_catalog_core;
