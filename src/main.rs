use geo_queries::mongo::{DEFAULT_COLLECTION, DEFAULT_URI};
use geo_queries::{run, Config, MemoryConnector, MongoConnector};
use std::io;
use structopt::StructOpt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "geo_queries",
    about = "Seeds a collection with GeoJSON features and runs geospatial queries on it"
)]
struct Opt {
    /// MongoDB connection string, the path selects the database
    #[structopt(long, env = "MONGODB_URI")]
    uri: Option<String>,

    #[structopt(long)]
    collection: Option<String>,

    /// Sample feature to look up the closest object for
    #[structopt(long)]
    nearest_to: Option<String>,

    /// Sample polygon to look up contained objects for
    #[structopt(long)]
    within: Option<String>,

    /// Use a throwaway in-memory store instead of MongoDB
    #[structopt(long)]
    in_memory: bool,

    #[structopt(short, long)]
    verbose: bool,
}

impl Opt {
    fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            nearest_to: self.nearest_to.clone().unwrap_or(defaults.nearest_to),
            within: self.within.clone().unwrap_or(defaults.within),
        }
    }
}

#[tokio::main]
async fn main() {
    let opt = Opt::from_args();

    let level = if opt.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let config = opt.config();
    let collection = opt.collection.as_deref().unwrap_or(DEFAULT_COLLECTION);
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    // failures were already reported by the run itself
    let _ = if opt.in_memory {
        let connector = MemoryConnector::new(collection);
        run(&connector, &config, &mut writer).await
    } else {
        let uri = opt.uri.as_deref().unwrap_or(DEFAULT_URI);
        let connector = MongoConnector::new(uri, collection);
        run(&connector, &config, &mut writer).await
    };
}
