use async_trait::async_trait;
use common::types::TravelMode;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::fmt::Display;

pub(crate) const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";
pub(crate) const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub(crate) const PLACES_NEARBY_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// One resolved travel time: raw seconds for comparisons plus the
/// display string the provider already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct ModeDuration {
    pub seconds: u32,
    pub text: String,
}

/// The seam the enricher and fetchers talk through. Production uses
/// [`GoogleMapsApi`]; tests script responses without a network.
#[async_trait]
pub trait DistanceMatrixApi: Send + Sync {
    /// One query per (origin, destination, mode) triple. The upstream
    /// API can batch destinations; this client does not use that.
    async fn travel_time(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<ModeDuration, ApiError>;
}

#[derive(Clone)]
pub struct GoogleMapsApi {
    pub(crate) client: Client,
    pub(crate) key: String,
    pub(crate) region: String,
}

impl GoogleMapsApi {
    pub fn new(key: String, region: String) -> Self {
        GoogleMapsApi {
            client: Client::new(),
            key,
            region,
        }
    }
}

#[async_trait]
impl DistanceMatrixApi for GoogleMapsApi {
    async fn travel_time(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<ModeDuration, ApiError> {
        let response = self.client
            .get(DISTANCE_MATRIX_URL)
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("mode", mode.api_name()),
                ("units", "metric"),
                ("region", self.region.as_str()),
                ("key", self.key.as_str()),
            ])
            .send()
            .await?;
        let data: DistanceMatrixResponse = response.json().await?;

        first_element_duration(data)
    }
}

/// Pull the single requested element out of the response envelope
pub(crate) fn first_element_duration(data: DistanceMatrixResponse) -> Result<ModeDuration, ApiError> {
    if data.status != "OK" {
        return Err(ApiError::Status(data.status));
    }
    let element = data.rows.into_iter().next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or(ApiError::EmptyResponse)?;
    if element.status != "OK" {
        return Err(ApiError::Status(element.status));
    }
    let duration = element.duration.ok_or(ApiError::EmptyResponse)?;

    Ok(ModeDuration {
        seconds: duration.value,
        text: duration.text,
    })
}

#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceMatrixElement {
    pub status: String,
    pub duration: Option<DurationField>,
}

#[derive(Debug, Deserialize)]
pub struct DurationField {
    /// Seconds
    pub value: u32,
    pub text: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    Reqwest(#[from] reqwest::Error),
    Status(String),
    EmptyResponse,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Reqwest(err) => write!(f, "{}", err),
            ApiError::Status(status) => write!(f, "API returned status {}", status),
            ApiError::EmptyResponse => write!(f, "API response carried no duration"),
        }
    }
}
