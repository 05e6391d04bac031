//! Ingester interface used by the task helpers.

use crate::dag_run::DagRun;
use crate::store::MediaStores;

/// Pulls records from a provider and writes them to its media stores
pub trait ProviderDataIngester {
    fn media_stores(&self) -> &MediaStores;

    fn media_stores_mut(&mut self) -> &mut MediaStores;

    /// Run the whole ingestion; takes no arguments, everything it needs
    /// was handed to the factory at construction time
    fn ingest_records(&mut self) -> anyhow::Result<()>;
}

/// Builds an ingester for a dag run from caller-supplied arguments `A`
pub trait IngesterFactory<A> {
    type Ingester: ProviderDataIngester;

    fn create(&self, dag_run: &DagRun, args: A) -> anyhow::Result<Self::Ingester>;
}

impl<F, A, I> IngesterFactory<A> for F
where
    F: Fn(&DagRun, A) -> anyhow::Result<I>,
    I: ProviderDataIngester,
{
    type Ingester = I;

    fn create(&self, dag_run: &DagRun, args: A) -> anyhow::Result<I> {
        self(dag_run, args)
    }
}
