// Fake provider ingester shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use openverse_catalog_core::{MediaType, Schedule};
use openverse_catalog_factory::{DagRun, MediaStore, MediaStores, ProviderDataIngester};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const FAKE_PROVIDER: &str = "fake_provider";

/// Stand-in for the provider function a real ingester would call
pub type InternalFunc = Rc<dyn Fn(i64) -> anyhow::Result<()>>;

/// Records every value the internal function was called with
#[derive(Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<i64>>>);

impl CallLog {
    pub fn func(&self) -> InternalFunc {
        let calls = Rc::clone(&self.0);
        Rc::new(move |value: i64| -> anyhow::Result<()> {
            calls.borrow_mut().push(value);
            Ok(())
        })
    }

    pub fn calls(&self) -> Vec<i64> {
        self.0.borrow().clone()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ValueError(pub String);

pub fn raising_func() -> InternalFunc {
    Rc::new(|value: i64| -> anyhow::Result<()> {
        Err(ValueError(format!("Whoops! {}", value)).into())
    })
}

/// Store paths seen by `ingest_records`, captured at call time
#[derive(Clone, Default)]
pub struct PathLog(Rc<RefCell<Vec<PathBuf>>>);

impl PathLog {
    pub fn paths(&self) -> Vec<PathBuf> {
        self.0.borrow().clone()
    }
}

/// Ingester with an image and an audio store that forwards `ingest_records`
/// to the function it was constructed with
pub struct FakeDataIngester {
    stores: MediaStores,
    func: InternalFunc,
    value: i64,
    seen_paths: PathLog,
}

impl FakeDataIngester {
    pub fn new(dag_run: &DagRun, output_dir: &Path, func: InternalFunc, value: i64) -> Self {
        let mut stores = MediaStores::new();
        for media_type in [MediaType::Image, MediaType::Audio] {
            stores.insert(MediaStore::for_dag_run(
                FAKE_PROVIDER,
                media_type,
                output_dir,
                dag_run,
            ));
        }
        Self {
            stores,
            func,
            value,
            seen_paths: PathLog::default(),
        }
    }

    pub fn with_path_log(mut self, log: PathLog) -> Self {
        self.seen_paths = log;
        self
    }
}

impl ProviderDataIngester for FakeDataIngester {
    fn media_stores(&self) -> &MediaStores {
        &self.stores
    }

    fn media_stores_mut(&mut self) -> &mut MediaStores {
        &mut self.stores
    }

    fn ingest_records(&mut self) -> anyhow::Result<()> {
        self.seen_paths
            .0
            .borrow_mut()
            .extend(self.stores.iter().map(|s| s.output_path().to_path_buf()));
        (self.func)(self.value)
    }
}

pub fn logical_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 2, 3, 0, 0, 0).unwrap()
}

pub fn dag_run() -> DagRun {
    DagRun::new("fake_provider_workflow", logical_date()).with_schedule(Schedule::Daily)
}
