//! Task entry points wrapping a provider ingester.

use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::dag_run::DagRun;
use crate::error::FactoryError;
use crate::ingester::{IngesterFactory, ProviderDataIngester};
use crate::store::MediaTypes;
use crate::xcom::XComChannel;

/// XCom key under which [`pull_media_wrapper`] reports its duration
pub const DURATION_KEY: &str = "duration";

/// Push the output path of each selected media store to XComs.
///
/// The ingester is constructed exactly as [`pull_media_wrapper`] would do it,
/// so the pushed paths match the stores it will write, but no records are
/// ingested. One push per store, keyed `{media_type}_tsv`, in registry order.
pub fn generate_tsv_filenames<F, A, T>(
    factory: &F,
    media_types: &MediaTypes,
    ti: &mut T,
    dag_run: &DagRun,
    args: A,
) -> anyhow::Result<()>
where
    F: IngesterFactory<A>,
    T: XComChannel + ?Sized,
{
    tracing::info!(dag_id = %dag_run.dag_id, "Pushing available store paths to XComs");

    let ingester = factory.create(dag_run, args)?;
    let stores = ingester.media_stores().select(media_types)?;

    for store in stores {
        let path = store.output_path().display().to_string();
        tracing::info!(
            media_type = %store.media_type(),
            path = %path,
            "Media store path"
        );
        ti.xcom_push(&format!("{}_tsv", store.media_type()), json!(path));
    }

    Ok(())
}

/// Run an ingester with its stores pointed at `tsv_filenames`.
///
/// The elapsed time is pushed under [`DURATION_KEY`] exactly once on every
/// exit path, including construction failures and panics. Errors from the
/// ingester are returned as-is after that push.
pub fn pull_media_wrapper<F, A, T, P>(
    factory: &F,
    media_types: &MediaTypes,
    tsv_filenames: &[P],
    ti: &mut T,
    dag_run: &DagRun,
    args: A,
) -> anyhow::Result<()>
where
    F: IngesterFactory<A>,
    T: XComChannel + ?Sized,
    P: AsRef<Path>,
{
    let _duration = DurationReport::start(ti);

    if media_types.len() != tsv_filenames.len() {
        return Err(
            FactoryError::media_type_mismatch(media_types.len(), tsv_filenames.len()).into(),
        );
    }

    let filenames: Vec<PathBuf> = tsv_filenames
        .iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect();
    tracing::info!(
        dag_id = %dag_run.dag_id,
        ?filenames,
        "Setting media stores to the provided TSV filenames"
    );

    let mut ingester = factory.create(dag_run, args)?;
    for (store, filename) in ingester
        .media_stores_mut()
        .select_mut(media_types)?
        .into_iter()
        .zip(filenames)
    {
        store.set_output_path(filename);
    }

    tracing::info!(dag_id = %dag_run.dag_id, "Beginning ingestion");
    ingester.ingest_records()
}

/// Pushes the time since `start` when dropped
struct DurationReport<'a, T: XComChannel + ?Sized> {
    ti: &'a mut T,
    start: Instant,
}

impl<'a, T: XComChannel + ?Sized> DurationReport<'a, T> {
    fn start(ti: &'a mut T) -> Self {
        Self {
            ti,
            start: Instant::now(),
        }
    }
}

impl<T: XComChannel + ?Sized> Drop for DurationReport<'_, T> {
    fn drop(&mut self) {
        // Clock resolution can round a very fast run down to zero.
        let duration = self.start.elapsed().as_secs_f64().max(f64::EPSILON);
        tracing::info!(duration_secs = duration, "Ingestion finished");
        self.ti.xcom_push(DURATION_KEY, json!(duration));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MediaStore, MediaStores};
    use crate::xcom::RecordingXCom;
    use chrono::{TimeZone, Utc};
    use openverse_catalog_core::MediaType;

    struct SingleStore {
        stores: MediaStores,
    }

    impl ProviderDataIngester for SingleStore {
        fn media_stores(&self) -> &MediaStores {
            &self.stores
        }

        fn media_stores_mut(&mut self) -> &mut MediaStores {
            &mut self.stores
        }

        fn ingest_records(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn build(_: &DagRun, _: ()) -> anyhow::Result<SingleStore> {
        let mut stores = MediaStores::new();
        stores.insert(MediaStore::new("smk", MediaType::Image, "smk.tsv".into()));
        Ok(SingleStore { stores })
    }

    fn dag_run() -> DagRun {
        DagRun::new("smk_workflow", Utc.with_ymd_and_hms(2022, 2, 3, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_mismatched_filenames_still_report_duration() {
        let mut ti = RecordingXCom::new();
        let err = pull_media_wrapper(
            &build,
            &MediaTypes::Named(vec![MediaType::Image]),
            &["a.tsv", "b.tsv"],
            &mut ti,
            &dag_run(),
            (),
        )
        .unwrap_err();

        assert!(err.downcast_ref::<FactoryError>().is_some());
        assert_eq!(ti.pushes().len(), 1);
        assert_eq!(ti.pushes()[0].key, DURATION_KEY);
    }

    #[test]
    fn test_construction_failure_reports_duration() {
        let failing = |_: &DagRun, _: ()| -> anyhow::Result<SingleStore> {
            anyhow::bail!("provider API key missing")
        };
        let mut ti = RecordingXCom::new();
        let err = pull_media_wrapper(
            &failing,
            &MediaTypes::Count(1),
            &["a.tsv"],
            &mut ti,
            &dag_run(),
            (),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "provider API key missing");
        assert_eq!(ti.pushes().len(), 1);
        assert!(ti.pull(DURATION_KEY).and_then(|v| v.as_f64()).unwrap() > 0.0);
    }

    #[test]
    fn test_generate_skips_duration() {
        let mut ti = RecordingXCom::new();
        generate_tsv_filenames(&build, &MediaTypes::Count(1), &mut ti, &dag_run(), ()).unwrap();
        assert_eq!(ti.pushes().len(), 1);
        assert_eq!(ti.pull("image_tsv"), Some(&json!("smk.tsv")));
        assert!(ti.pull(DURATION_KEY).is_none());
    }
}
