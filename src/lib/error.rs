use mongodb::bson;
use std::io;
use thiserror::Error;

/// Failures reported by a feature store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("could not encode geometry: {0}")]
    Bson(#[from] bson::ser::Error),
    #[error("duplicate key: a feature named {0:?} already exists")]
    DuplicateName(String),
    #[error("unable to find index for $geoNear query")]
    MissingGeoIndex,
    #[error("unsupported query: {0}")]
    Unsupported(String),
}

/// The first failure of a run, tagged with the step it stopped at.
#[derive(Debug, Error)]
pub enum Error {
    #[error("connecting failed: {0}")]
    Connect(#[source] StoreError),
    #[error("removing documents failed: {0}")]
    Clear(#[source] StoreError),
    #[error("inserting sample data failed: {0}")]
    Insert(#[source] StoreError),
    #[error("{query} query failed: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("no sample feature named {0:?}")]
    MissingFeature(String),
    #[error("could not serialize feature: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not write report: {0}")]
    Report(#[from] io::Error),
}

impl Error {
    pub fn query(query: &'static str) -> impl FnOnce(StoreError) -> Error {
        move |source| Error::Query { query, source }
    }
}
