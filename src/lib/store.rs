use super::error::StoreError;
use super::geojson::{Feature, GeometryKind};

/// A collection of named features that answers spatial queries.
///
/// Calls are made one at a time; each stage of a run awaits the previous.
#[allow(async_fn_in_trait)]
pub trait FeatureStore {
    fn collection_name(&self) -> &str;

    /// Removes every document, returns how many were removed.
    async fn clear(&mut self) -> Result<u64, StoreError>;

    /// Unique ascending index on `name`.
    async fn ensure_name_index(&mut self) -> Result<(), StoreError>;

    /// `2dsphere` index on `geom`.
    async fn ensure_geo_index(&mut self) -> Result<(), StoreError>;

    /// Ordered bulk insert; stops at the first rejected document.
    async fn insert_many(&mut self, features: &[Feature]) -> Result<(), StoreError>;

    async fn find_by_kind(&self, kind: GeometryKind) -> Result<Vec<Feature>, StoreError>;

    /// The closest other feature, if there is one.
    async fn find_nearest(&self, reference: &Feature) -> Result<Option<Feature>, StoreError>;

    async fn find_within(&self, reference: &Feature) -> Result<Vec<Feature>, StoreError>;

    async fn close(self) -> Result<(), StoreError>;
}

#[allow(async_fn_in_trait)]
pub trait Connector {
    type Store: FeatureStore;

    /// Human readable target, e.g. `MongoDB at mongodb://localhost:27017`
    fn describe(&self) -> String;

    async fn connect(&self) -> Result<Self::Store, StoreError>;
}
