//! Media stores: per-media-type TSV sinks
//!
//! Output layout:
//! `{output_dir}/{partition prefix}/{provider}_{media_type}_{YYYYMMDDHHMMSS}.tsv`

use openverse_catalog_core::MediaType;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::dag_run::DagRun;
use crate::error::{FactoryError, Result};

const DEFAULT_BUFFER_LENGTH: usize = 100;

/// Deterministic TSV output path for a provider's media type in a dag run
pub fn tsv_output_path(
    output_dir: &Path,
    provider: &str,
    media_type: MediaType,
    dag_run: &DagRun,
) -> PathBuf {
    let filename = format!(
        "{}_{}_{}.tsv",
        provider,
        media_type,
        dag_run.logical_date.format("%Y%m%d%H%M%S")
    );
    output_dir.join(dag_run.partition_prefix()).join(filename)
}

/// Buffered TSV sink for one media type
#[derive(Debug)]
pub struct MediaStore {
    provider: String,
    media_type: MediaType,
    output_path: PathBuf,
    buffer: Vec<String>,
    buffer_length: usize,
    total_records: usize,
}

impl MediaStore {
    pub fn new(provider: impl Into<String>, media_type: MediaType, output_path: PathBuf) -> Self {
        Self {
            provider: provider.into(),
            media_type,
            output_path,
            buffer: Vec::new(),
            buffer_length: DEFAULT_BUFFER_LENGTH,
            total_records: 0,
        }
    }

    /// Store whose output path is derived from the dag run
    pub fn for_dag_run(
        provider: impl Into<String>,
        media_type: MediaType,
        output_dir: &Path,
        dag_run: &DagRun,
    ) -> Self {
        let provider = provider.into();
        let output_path = tsv_output_path(output_dir, &provider, media_type, dag_run);
        Self::new(provider, media_type, output_path)
    }

    pub fn with_buffer_length(mut self, buffer_length: usize) -> Self {
        self.buffer_length = buffer_length.max(1);
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn set_output_path(&mut self, path: impl Into<PathBuf>) {
        self.output_path = path.into();
    }

    /// Records accepted so far, flushed or not
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Buffer one record, flushing when the buffer is full
    pub fn add_record<I, S>(&mut self, fields: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row = fields
            .into_iter()
            .map(|field| sanitize_field(field.as_ref()))
            .collect::<Vec<_>>()
            .join("\t");
        self.buffer.push(row);
        self.total_records += 1;

        if self.buffer.len() >= self.buffer_length {
            self.flush()?;
        }
        Ok(self.total_records)
    }

    /// Flush anything still buffered; returns the total record count
    pub fn commit(&mut self) -> Result<usize> {
        self.flush()?;
        tracing::info!(
            provider = %self.provider,
            media_type = %self.media_type,
            path = %self.output_path.display(),
            total_records = self.total_records,
            "Committed media store"
        );
        Ok(self.total_records)
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let path = &self.output_path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FactoryError::store_write(path, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| FactoryError::store_write(path, e))?;
        let mut writer = BufWriter::new(file);
        for row in &self.buffer {
            writeln!(writer, "{}", row).map_err(|e| FactoryError::store_write(path, e))?;
        }
        writer
            .flush()
            .map_err(|e| FactoryError::store_write(path, e))?;

        tracing::debug!(
            path = %path.display(),
            rows = self.buffer.len(),
            "Flushed media store buffer"
        );
        self.buffer.clear();
        Ok(())
    }
}

/// Tabs and newlines would break the TSV framing
fn sanitize_field(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

/// Which media stores a task works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaTypes {
    /// Stores for exactly these media types
    Named(Vec<MediaType>),
    /// The first `n` stores in registry order
    Count(usize),
}

impl MediaTypes {
    pub fn len(&self) -> usize {
        match self {
            MediaTypes::Named(types) => types.len(),
            MediaTypes::Count(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<MediaType>> for MediaTypes {
    fn from(types: Vec<MediaType>) -> Self {
        MediaTypes::Named(types)
    }
}

impl From<&[MediaType]> for MediaTypes {
    fn from(types: &[MediaType]) -> Self {
        MediaTypes::Named(types.to_vec())
    }
}

impl From<usize> for MediaTypes {
    fn from(n: usize) -> Self {
        MediaTypes::Count(n)
    }
}

/// Ordered registry of an ingester's media stores
///
/// Iteration follows insertion order; both task helpers rely on it.
#[derive(Debug, Default)]
pub struct MediaStores {
    stores: Vec<MediaStore>,
}

impl MediaStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store, replacing any existing store for the same media type in place
    pub fn insert(&mut self, store: MediaStore) {
        match self
            .stores
            .iter_mut()
            .find(|s| s.media_type == store.media_type)
        {
            Some(existing) => *existing = store,
            None => self.stores.push(store),
        }
    }

    pub fn get(&self, media_type: MediaType) -> Option<&MediaStore> {
        self.stores.iter().find(|s| s.media_type == media_type)
    }

    pub fn get_mut(&mut self, media_type: MediaType) -> Option<&mut MediaStore> {
        self.stores.iter_mut().find(|s| s.media_type == media_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaStore> {
        self.stores.iter()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Stores picked by `media_types`, in registry order
    pub fn select(&self, media_types: &MediaTypes) -> Result<Vec<&MediaStore>> {
        let indices = self.selected_indices(media_types)?;
        Ok(indices.into_iter().map(|i| &self.stores[i]).collect())
    }

    /// Mutable variant of [`MediaStores::select`]
    pub fn select_mut(&mut self, media_types: &MediaTypes) -> Result<Vec<&mut MediaStore>> {
        let indices = self.selected_indices(media_types)?;
        Ok(self
            .stores
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, store)| store)
            .collect())
    }

    /// Commit every store; returns the number of records across all of them
    pub fn commit_all(&mut self) -> Result<usize> {
        let mut total = 0;
        for store in &mut self.stores {
            total += store.commit()?;
        }
        Ok(total)
    }

    fn selected_indices(&self, media_types: &MediaTypes) -> Result<Vec<usize>> {
        match media_types {
            MediaTypes::Named(types) => {
                if let Some((i, repeated)) = types
                    .iter()
                    .enumerate()
                    .find(|&(i, t)| types[..i].contains(t))
                {
                    return Err(FactoryError::missing_store(format!(
                        "{} is listed more than once (position {})",
                        repeated,
                        i + 1
                    )));
                }
                if let Some(missing) = types.iter().find(|t| self.get(**t).is_none()) {
                    return Err(FactoryError::missing_store(format!(
                        "no {} store is configured",
                        missing
                    )));
                }
                Ok(self
                    .stores
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| types.contains(&s.media_type))
                    .map(|(i, _)| i)
                    .collect())
            }
            MediaTypes::Count(n) => {
                if *n > self.stores.len() {
                    return Err(FactoryError::missing_store(format!(
                        "{} stores requested but only {} configured",
                        n,
                        self.stores.len()
                    )));
                }
                Ok((0..*n).collect())
            }
        }
    }
}
