use self::geojson::{Feature, GeometryKind};
use self::items::{find_by_name, sample_features};
use self::output::Output;
use itertools::Itertools;
use std::io::{self, Write};
use tracing::{debug, info, warn, Level};

pub mod error;
pub mod filter;
mod geo;
pub mod geojson;
pub mod items;
pub mod memory;
pub mod mongo;
pub mod output;
pub mod store;
#[cfg(test)]
mod test_helpers;

pub use self::error::{Error, StoreError};
pub use self::geo::Measurable;
pub use self::memory::{MemoryConnector, MemoryStore};
pub use self::mongo::{MongoConnector, MongoStore};
pub use self::store::{Connector, FeatureStore};

pub const DEFAULT_NEAREST_TO: &str = "pedestrian2";
pub const DEFAULT_WITHIN: &str = "building2";

/// Names of the sample features the two spatial queries are run against.
#[derive(Debug, Clone)]
pub struct Config {
    pub nearest_to: String,
    pub within: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            nearest_to: DEFAULT_NEAREST_TO.into(),
            within: DEFAULT_WITHIN.into(),
        }
    }
}

fn lookup<'a>(features: &'a [Feature], name: &str) -> Result<&'a Feature, Error> {
    find_by_name(features, name).ok_or_else(|| Error::MissingFeature(name.into()))
}

/// Removes all documents, makes sure the indexes exist and inserts `features`.
///
/// Index creation failures are logged but do not stop the seeding.
pub async fn seed<S: FeatureStore>(
    store: &mut S,
    features: &[Feature],
    writer: &mut dyn Write,
) -> Result<(), Error> {
    let collection = store.collection_name().to_owned();

    writeln!(writer, "Removing all documents in collection \"{}\"", collection)?;
    let removed = store.clear().await.map_err(Error::Clear)?;
    debug!(removed, "collection cleared");

    writeln!(
        writer,
        "Ensuring unique index on \"name\" property of collection \"{}\"",
        collection
    )?;
    if let Err(err) = store.ensure_name_index().await {
        warn!(%err, "could not create unique index on name");
    }
    writeln!(
        writer,
        "Ensuring 2dsphere index on \"geom\" property of collection \"{}\"",
        collection
    )?;
    if let Err(err) = store.ensure_geo_index().await {
        warn!(%err, "could not create 2dsphere index on geom");
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "Inserting {} sample geospatial documents in collection \"{}\":",
        features.len(),
        collection
    )?;
    features.write_json_lines(writer)?;
    store.insert_many(features).await.map_err(Error::Insert)
}

pub async fn find_areas<S: FeatureStore>(store: &S, writer: &mut dyn Write) -> Result<(), Error> {
    writeln!(writer)?;
    writeln!(writer, "Find all polygons and calculating their areas:")?;
    let polygons = store
        .find_by_kind(GeometryKind::Polygon)
        .await
        .map_err(Error::query("area"))?;
    debug!(names = %polygons.iter().map(|f| &f.name).join(", "), "polygons found");
    for feature in polygons.iter() {
        let area = feature.geom.area();
        writeln!(writer, "- area of {} = {} sq. m.", feature.name, area)?;
    }
    Ok(())
}

pub async fn find_closest<S: FeatureStore>(
    store: &S,
    reference: &Feature,
    writer: &mut dyn Write,
) -> Result<(), Error> {
    writeln!(writer)?;
    writeln!(writer, "Find closest object to {}:", reference.name)?;
    let closest = store
        .find_nearest(reference)
        .await
        .map_err(Error::query("nearest"))?;
    closest.write_json_lines(writer)
}

pub async fn find_within<S: FeatureStore>(
    store: &S,
    reference: &Feature,
    writer: &mut dyn Write,
) -> Result<(), Error> {
    writeln!(writer)?;
    writeln!(writer, "Find objects within {}:", reference.name)?;
    let within = store
        .find_within(reference)
        .await
        .map_err(Error::query("within"))?;
    within.write_json_lines(writer)
}

async fn execute<C: Connector>(
    connector: &C,
    config: &Config,
    slot: &mut Option<C::Store>,
    writer: &mut dyn Write,
) -> Result<(), Error> {
    let store = connector.connect().await.map_err(Error::Connect)?;
    let store = slot.insert(store);
    info!(store = %connector.describe(), "connected");
    writeln!(writer)?;
    writeln!(writer, "Connected to {}", connector.describe())?;
    writeln!(writer)?;

    let features = sample_features();
    seed(&mut *store, &features, writer).await?;
    find_areas(&*store, writer).await?;
    let reference = lookup(&features, &config.nearest_to)?;
    find_closest(&*store, reference, writer).await?;
    let reference = lookup(&features, &config.within)?;
    find_within(&*store, reference, writer).await
}

/// Logs the failure of a run, or writes it to `fallback` when the log filter
/// would swallow warnings.
fn warn_failure(err: &Error, fallback: &mut dyn Write) {
    if tracing::enabled!(Level::WARN) {
        warn!("{}", err);
    } else if let Err(write_err) = writeln!(fallback, "warning: {}", err) {
        debug!(%write_err, "could not report failure");
    }
}

async fn cleanup<S: FeatureStore>(
    result: Result<(), Error>,
    store: Option<S>,
    writer: &mut dyn Write,
) -> Result<(), Error> {
    match &result {
        Err(err) => warn_failure(err, &mut io::stderr()),
        Ok(()) => {
            if let Err(err) = writeln!(writer) {
                debug!(%err, "could not write separator");
            }
        }
    }
    if let Some(store) = store {
        if let Err(err) = store.close().await {
            debug!(%err, "closing store failed");
        }
    }
    result
}

/// Connects, seeds the sample features and reports the area, nearest and
/// within queries to `writer`.
///
/// Stops at the first failure. Either way the failure is logged and an opened
/// store is closed exactly once before returning.
pub async fn run<C: Connector>(
    connector: &C,
    config: &Config,
    writer: &mut dyn Write,
) -> Result<(), Error> {
    let mut store = None;
    let result = execute(connector, config, &mut store, writer).await;
    cleanup(result, store, writer).await
}
