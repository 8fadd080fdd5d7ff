use super::error::StoreError;
use super::geojson::{Feature, GeometryKind};
use super::memory::MemoryStore;
use super::store::{Connector, FeatureStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Connect,
    Clear,
    NameIndex,
    GeoIndex,
    Insert,
    Area,
    Nearest,
    Within,
}

fn injected(step: Step) -> StoreError {
    StoreError::Unsupported(format!("injected failure at {:?}", step))
}

/// Hands out memory stores that fail at one chosen step and count how often
/// they were closed.
pub struct FaultyConnector {
    fail_at: Option<Step>,
    closed: Arc<AtomicUsize>,
}

impl FaultyConnector {
    pub fn new(fail_at: Option<Step>) -> Self {
        FaultyConnector {
            fail_at,
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Connector for FaultyConnector {
    type Store = FaultyStore;

    fn describe(&self) -> String {
        "faulty store".into()
    }

    async fn connect(&self) -> Result<FaultyStore, StoreError> {
        if self.fail_at == Some(Step::Connect) {
            return Err(injected(Step::Connect));
        }
        Ok(FaultyStore {
            inner: MemoryStore::new("test"),
            fail_at: self.fail_at,
            closed: self.closed.clone(),
        })
    }
}

pub struct FaultyStore {
    inner: MemoryStore,
    fail_at: Option<Step>,
    closed: Arc<AtomicUsize>,
}

impl FaultyStore {
    fn check(&self, step: Step) -> Result<(), StoreError> {
        if self.fail_at == Some(step) {
            return Err(injected(step));
        }
        Ok(())
    }
}

impl FeatureStore for FaultyStore {
    fn collection_name(&self) -> &str {
        self.inner.collection_name()
    }

    async fn clear(&mut self) -> Result<u64, StoreError> {
        self.check(Step::Clear)?;
        self.inner.clear().await
    }

    async fn ensure_name_index(&mut self) -> Result<(), StoreError> {
        self.check(Step::NameIndex)?;
        self.inner.ensure_name_index().await
    }

    async fn ensure_geo_index(&mut self) -> Result<(), StoreError> {
        self.check(Step::GeoIndex)?;
        self.inner.ensure_geo_index().await
    }

    async fn insert_many(&mut self, features: &[Feature]) -> Result<(), StoreError> {
        self.check(Step::Insert)?;
        self.inner.insert_many(features).await
    }

    async fn find_by_kind(&self, kind: GeometryKind) -> Result<Vec<Feature>, StoreError> {
        self.check(Step::Area)?;
        self.inner.find_by_kind(kind).await
    }

    async fn find_nearest(&self, reference: &Feature) -> Result<Option<Feature>, StoreError> {
        self.check(Step::Nearest)?;
        self.inner.find_nearest(reference).await
    }

    async fn find_within(&self, reference: &Feature) -> Result<Vec<Feature>, StoreError> {
        self.check(Step::Within)?;
        self.inner.find_within(reference).await
    }

    async fn close(self) -> Result<(), StoreError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await
    }
}
