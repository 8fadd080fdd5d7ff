use super::error::StoreError;
use super::geo::{get_distance, is_within};
use super::geojson::{Feature, GeometryKind};
use super::store::{Connector, FeatureStore};
use tracing::debug;

/// Connects to a fresh, empty [`MemoryStore`].
pub struct MemoryConnector {
    collection: String,
}

impl MemoryConnector {
    pub fn new(collection: &str) -> Self {
        MemoryConnector {
            collection: collection.into(),
        }
    }
}

impl Connector for MemoryConnector {
    type Store = MemoryStore;

    fn describe(&self) -> String {
        "in-memory store".into()
    }

    async fn connect(&self) -> Result<MemoryStore, StoreError> {
        Ok(MemoryStore::new(&self.collection))
    }
}

/// A collection held in process memory.
///
/// It follows the rules a MongoDB collection enforces (unique names once
/// indexed, `$near` needs a geo index and a point, `$geoWithin` needs a
/// polygon) but measures in plain degrees instead of on the sphere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    features: Vec<Feature>,
    unique_names: bool,
    geo_index: bool,
}

impl MemoryStore {
    pub fn new(name: &str) -> Self {
        MemoryStore {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    fn others<'a>(&'a self, reference: &'a Feature) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features
            .iter()
            .filter(move |feature| feature.name != reference.name)
    }
}

impl FeatureStore for MemoryStore {
    fn collection_name(&self) -> &str {
        &self.name
    }

    async fn clear(&mut self) -> Result<u64, StoreError> {
        let count = self.features.len() as u64;
        self.features.clear();
        Ok(count)
    }

    async fn ensure_name_index(&mut self) -> Result<(), StoreError> {
        if let Some(name) = first_duplicate(&self.features) {
            return Err(StoreError::DuplicateName(name.into()));
        }
        self.unique_names = true;
        Ok(())
    }

    async fn ensure_geo_index(&mut self) -> Result<(), StoreError> {
        self.geo_index = true;
        Ok(())
    }

    async fn insert_many(&mut self, features: &[Feature]) -> Result<(), StoreError> {
        for feature in features {
            if self.unique_names && self.features.iter().any(|f| f.name == feature.name) {
                return Err(StoreError::DuplicateName(feature.name.clone()));
            }
            self.features.push(feature.clone());
        }
        debug!(count = features.len(), "inserted");
        Ok(())
    }

    async fn find_by_kind(&self, kind: GeometryKind) -> Result<Vec<Feature>, StoreError> {
        let features = self
            .features
            .iter()
            .filter(|feature| feature.geom.kind() == kind)
            .cloned()
            .collect();
        Ok(features)
    }

    async fn find_nearest(&self, reference: &Feature) -> Result<Option<Feature>, StoreError> {
        if !self.geo_index {
            return Err(StoreError::MissingGeoIndex);
        }
        let point = reference.geom.as_point().ok_or_else(|| {
            StoreError::Unsupported(format!("$near needs a Point, got {}", reference.geom.kind()))
        })?;
        let nearest = self
            .others(reference)
            .map(|feature| (get_distance(&point, &feature.geom), feature))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, feature)| feature.clone());
        Ok(nearest)
    }

    async fn find_within(&self, reference: &Feature) -> Result<Vec<Feature>, StoreError> {
        let polygon = reference.geom.as_polygon().ok_or_else(|| {
            StoreError::Unsupported(format!(
                "$geoWithin needs a Polygon, got {}",
                reference.geom.kind()
            ))
        })?;
        let features = self
            .others(reference)
            .filter(|feature| is_within(&feature.geom, &polygon))
            .cloned()
            .collect();
        Ok(features)
    }

    async fn close(self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn first_duplicate(features: &[Feature]) -> Option<&str> {
    features.iter().enumerate().find_map(|(idx, feature)| {
        let seen = features[..idx].iter().any(|f| f.name == feature.name);
        if seen {
            Some(feature.name.as_str())
        } else {
            None
        }
    })
}
