use crate::api::{ApiError, GoogleMapsApi, PLACES_NEARBY_URL};
use log::warn;
use serde::Deserialize;

// Search radius in meters
const NEARBY_RADIUS: &str = "1000";

impl GoogleMapsApi {
    /// Names of places of `place_type` around the coordinate. Failures
    /// degrade to an empty list; the dashboard shows missing amenity
    /// data as "no info".
    pub async fn places_nearby(&self, lat: f64, lng: f64, place_type: &str) -> Vec<String> {
        match self.try_places_nearby(lat, lng, place_type).await {
            Ok(names) => names,
            Err(err) => {
                warn!(target: "places", "Error retrieving places: {}", err);
                Vec::new()
            }
        }
    }

    async fn try_places_nearby(
        &self,
        lat: f64,
        lng: f64,
        place_type: &str,
    ) -> Result<Vec<String>, ApiError> {
        let location = format!("{},{}", lat, lng);
        let response = self.client
            .get(PLACES_NEARBY_URL)
            .query(&[
                ("location", location.as_str()),
                ("radius", NEARBY_RADIUS),
                ("type", place_type),
                ("key", self.key.as_str()),
            ])
            .send()
            .await?;
        let data: PlacesResponse = response.json().await?;

        if data.status != "OK" {
            warn!(target: "places", "No places found: {}", data.status);
            return Ok(Vec::new());
        }
        Ok(data.results.into_iter().map(|place| place.name).collect())
    }
}

#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
pub struct Place {
    pub name: String,
}
