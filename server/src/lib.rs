mod api;

use axum::routing::get;
use axum::Router;
use commute::api::GoogleMapsApi;
use commute::enrich::CommuteEnricher;
use polars::frame::DataFrame;
use std::fmt::Display;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

struct AppData {
    properties: DataFrame,
    maps: GoogleMapsApi,
    // Single owner for cache + fetcher; enrichment passes serialize here
    enricher: Mutex<CommuteEnricher>,
}

pub async fn build(
    listen: &str,
    properties: DataFrame,
    maps: GoogleMapsApi,
    enricher: CommuteEnricher,
) -> Result<(TcpListener, Router), ServerError> {
    let app_data = Arc::new(AppData {
        properties,
        maps,
        enricher: Mutex::new(enricher),
    });

    let app = Router::new()
        .route("/api/v1/areas", get(api::v1::areas::endpoint))
        .route("/api/v1/filters", get(api::v1::filters::endpoint))
        .route("/api/v1/commute", get(api::v1::commute::endpoint))
        .route("/api/v1/geocode", get(api::v1::geocode::endpoint))
        .route("/api/v1/outcode", get(api::v1::geocode::outcode_endpoint))
        .route("/api/v1/nearby", get(api::v1::places::endpoint))
        .with_state(app_data);

    let listener = TcpListener::bind(listen).await?;

    Ok((listener, app))
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    Io(#[from] std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
