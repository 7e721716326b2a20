pub mod bootstrap_config;
mod config;

use crate::bootstrap_config::BootstrapConfig;
use crate::config::load_config;
use common::types::config::Config;
use common::util::logging;
use commute::api::GoogleMapsApi;
use commute::cache::{CacheError, CommuteCache, JsonFileStore};
use commute::enrich::CommuteEnricher;
use dataset::step1_fetch::{fetch_dataset, FetchError};
use dataset::step2_import::{import_properties, ImportError};
use log::{debug, error, info};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tokio::signal;

#[tokio::main]
async fn main() {
    let _ = run()
        .await
        .inspect_err(|err| error!(target: "main", "{}", err));
}

async fn run() -> Result<(), HomescoutError> {
    let bootstrap_config = BootstrapConfig::read();

    logging::init(bootstrap_config.clone().log_level.into());
    print_startup_message();

    let config = load_config(&bootstrap_config)?;
    let Config::Version1 { dataset, cache, commute } = config;

    let fetched = logging::run_with_spinner_async(
        "main", "Fetching property table",
        || fetch_dataset(dataset),
    ).await?;
    let properties = logging::run_with_spinner(
        "main", "Importing property table",
        || import_properties(fetched),
    )?;

    let commute_cache = CommuteCache::open(Box::new(JsonFileStore::new(&cache.path)))?;
    info!(target: "main", "Commute cache at '{}' holds {} entries", cache.path, commute_cache.len());

    let maps = GoogleMapsApi::new(bootstrap_config.api_key.clone(), commute.region.clone());
    let enricher = CommuteEnricher::new(
        commute_cache,
        Box::new(maps.clone()),
        Duration::from_millis(commute.rate_limit_ms),
    );

    let (listener, app) = server::build(&bootstrap_config.listen, properties, maps, enricher).await?;
    info!(target: "server", "API listening on {}", bootstrap_config.listen);
    let api_server = tokio::spawn(async move { axum::serve(listener, app).await });

    signal::ctrl_c().await?;
    info!(target: "main", "Received shutdown signal");
    api_server.abort();
    debug!(target: "main", "API server stopped");

    Ok(())
}

fn print_startup_message() {
    info!("\n  _                                            _   \n | |__   ___  _ __ ___   ___  ___  ___ ___  _   _| |_ \n | '_ \\ / _ \\| '_ ` _ \\ / _ \\/ __|/ __/ _ \\| | | | __|\n | | | | (_) | | | | | |  __/\\__ \\ (_| (_) | |_| | |_ \n |_| |_|\\___/|_| |_| |_|\\___||___/\\___\\___/ \\__,_|\\__|\n\n L O N D O N   A R E A   F I N D E R\n");
}

#[derive(thiserror::Error, Debug)]
pub enum HomescoutError {
    Config(#[from] config::ConfigError),
    Fetch(#[from] FetchError),
    Import(#[from] ImportError),
    Cache(#[from] CacheError),
    Server(#[from] server::ServerError),
    IO(#[from] std::io::Error),
}

impl Display for HomescoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let err: &dyn Display = match self {
            HomescoutError::Config(err) => err,
            HomescoutError::Fetch(err) => err,
            HomescoutError::Import(err) => err,
            HomescoutError::Cache(err) => err,
            HomescoutError::Server(err) => err,
            HomescoutError::IO(err) => err,
        };
        let prefix = match self {
            HomescoutError::Config(_) => "Reading config file",
            HomescoutError::Fetch(_) => "Fetching property table",
            HomescoutError::Import(_) => "Importing property table",
            HomescoutError::Cache(_) => "Opening commute cache",
            HomescoutError::Server(_) => "Error in server",
            HomescoutError::IO(_) => "Error during IO",
        };
        write!(f, "{}: {}", prefix, err)
    }
}
