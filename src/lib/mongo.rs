use super::error::StoreError;
use super::filter;
use super::geojson::{Feature, GeometryKind};
use super::store::{Connector, FeatureStore};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::debug;

pub const DEFAULT_URI: &str = "mongodb://localhost:27017/mongodb-geospatial-queries";
pub const DEFAULT_DATABASE: &str = "mongodb-geospatial-queries";
pub const DEFAULT_COLLECTION: &str = "test";

/// The database named in the URI path, `mongodb-geospatial-queries` if there is none.
fn get_database_name(options: &ClientOptions) -> String {
    options
        .default_database
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE.into())
}

pub struct MongoConnector {
    uri: String,
    collection: String,
}

impl MongoConnector {
    pub fn new(uri: &str, collection: &str) -> Self {
        MongoConnector {
            uri: uri.into(),
            collection: collection.into(),
        }
    }
}

impl Connector for MongoConnector {
    type Store = MongoStore;

    fn describe(&self) -> String {
        format!("MongoDB at {}", self.uri)
    }

    async fn connect(&self) -> Result<MongoStore, StoreError> {
        let options = ClientOptions::parse(&self.uri).await?;
        let database_name = get_database_name(&options);
        let client = Client::with_options(options)?;
        let database = client.database(&database_name);

        // the driver connects lazily, a ping surfaces an unreachable server here
        database.run_command(doc! { "ping": 1 }, None).await?;
        debug!(database = %database_name, collection = %self.collection, "connected");

        let collection = database.collection(&self.collection);
        Ok(MongoStore { client, collection })
    }
}

pub struct MongoStore {
    client: Client,
    collection: Collection<Feature>,
}

impl FeatureStore for MongoStore {
    fn collection_name(&self) -> &str {
        self.collection.name()
    }

    async fn clear(&mut self) -> Result<u64, StoreError> {
        let result = self.collection.delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }

    async fn ensure_name_index(&mut self) -> Result<(), StoreError> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(options)
            .build();
        let result = self.collection.create_index(model, None).await?;
        debug!(index = %result.index_name, "index ready");
        Ok(())
    }

    async fn ensure_geo_index(&mut self) -> Result<(), StoreError> {
        let model = IndexModel::builder()
            .keys(doc! { "geom": "2dsphere" })
            .build();
        let result = self.collection.create_index(model, None).await?;
        debug!(index = %result.index_name, "index ready");
        Ok(())
    }

    async fn insert_many(&mut self, features: &[Feature]) -> Result<(), StoreError> {
        let result = self.collection.insert_many(features, None).await?;
        debug!(count = result.inserted_ids.len(), "inserted");
        Ok(())
    }

    async fn find_by_kind(&self, kind: GeometryKind) -> Result<Vec<Feature>, StoreError> {
        let cursor = self
            .collection
            .find(filter::geometry_type(kind), None)
            .await?;
        let features: Vec<Feature> = cursor.try_collect().await?;
        Ok(features)
    }

    async fn find_nearest(&self, reference: &Feature) -> Result<Option<Feature>, StoreError> {
        let filter = filter::near(reference)?;
        Ok(self.collection.find_one(filter, None).await?)
    }

    async fn find_within(&self, reference: &Feature) -> Result<Vec<Feature>, StoreError> {
        let filter = filter::within(reference)?;
        let cursor = self.collection.find(filter, None).await?;
        let features: Vec<Feature> = cursor.try_collect().await?;
        Ok(features)
    }

    async fn close(self) -> Result<(), StoreError> {
        self.client.shutdown().await;
        Ok(())
    }
}
