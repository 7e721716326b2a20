use crate::api::{ApiError, GoogleMapsApi, GEOCODE_URL};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedAddress {
    pub lat: f64,
    pub lng: f64,
    pub postcode: Option<String>,
    pub locality: Option<String>,
    pub full_address: String,
}

impl GoogleMapsApi {
    /// Resolve a free-text address. `None` when the provider has no
    /// result for it.
    pub async fn geocode_address(&self, address: &str) -> Result<Option<GeocodedAddress>, ApiError> {
        let response = self.client
            .get(GEOCODE_URL)
            .query(&[("address", address), ("key", self.key.as_str())])
            .send()
            .await?;
        let data: GeocodeResponse = response.json().await?;

        if data.status != "OK" {
            warn!(target: "geocode", "Geocoding failed: {}", data.status);
            return Ok(None);
        }
        Ok(data.results.first().map(geocoded_address))
    }

    /// Postal district (outcode) for a coordinate. Restricted to
    /// Greater London: the property table is London-only, so an outcode
    /// from anywhere else could never join back onto it.
    pub async fn reverse_geocode_outcode(&self, lat: f64, lng: f64) -> Result<Option<String>, ApiError> {
        let latlng = format!("{},{}", lat, lng);
        let response = self.client
            .get(GEOCODE_URL)
            .query(&[
                ("latlng", latlng.as_str()),
                // Adds UK bias but doesn't restrict
                ("region", self.region.as_str()),
                ("key", self.key.as_str()),
            ])
            .send()
            .await?;
        let data: GeocodeResponse = response.json().await?;

        if data.status != "OK" {
            warn!(target: "geocode", "Reverse geocoding failed: {}", data.status);
            return Ok(None);
        }
        Ok(data.results.first().and_then(outcode))
    }
}

fn geocoded_address(result: &GeocodeResult) -> GeocodedAddress {
    GeocodedAddress {
        lat: result.geometry.location.lat,
        lng: result.geometry.location.lng,
        postcode: result.component("postal_code").map(String::from),
        locality: result
            .component("postal_town")
            .or_else(|| result.component("neighborhood"))
            .map(String::from),
        full_address: result.formatted_address.clone(),
    }
}

pub(crate) fn outcode(result: &GeocodeResult) -> Option<String> {
    if result.component("country") != Some("United Kingdom")
        || result.component("administrative_area_level_2") != Some("Greater London")
    {
        return None;
    }
    let postcode = result.component("postal_code")?;
    postcode.split_whitespace().next().map(String::from)
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

impl GeocodeResult {
    fn component(&self, wanted: &str) -> Option<&str> {
        self.address_components.iter()
            .find(|component| component.types.iter().any(|t| t == wanted))
            .map(|component| component.long_name.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canary_wharf() -> GeocodeResult {
        serde_json::from_str(
            r#"{
                "formatted_address": "Canary Wharf, London E14, UK",
                "geometry": {"location": {"lat": 51.5054, "lng": -0.0235}},
                "address_components": [
                    {"long_name": "Canary Wharf", "types": ["neighborhood", "political"]},
                    {"long_name": "London", "types": ["postal_town"]},
                    {"long_name": "Greater London", "types": ["administrative_area_level_2", "political"]},
                    {"long_name": "United Kingdom", "types": ["country", "political"]},
                    {"long_name": "E14 5AB", "types": ["postal_code"]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn address_components_are_extracted() {
        let address = geocoded_address(&canary_wharf());
        assert_eq!(address.lat, 51.5054);
        assert_eq!(address.postcode.as_deref(), Some("E14 5AB"));
        // postal town wins over the neighborhood component
        assert_eq!(address.locality.as_deref(), Some("London"));
        assert_eq!(address.full_address, "Canary Wharf, London E14, UK");
    }

    #[test]
    fn outcode_is_the_postcode_prefix() {
        assert_eq!(outcode(&canary_wharf()).as_deref(), Some("E14"));
    }

    #[test]
    fn outcode_outside_greater_london_is_none() {
        let manchester: GeocodeResult = serde_json::from_str(
            r#"{
                "formatted_address": "Manchester M1, UK",
                "geometry": {"location": {"lat": 53.4794, "lng": -2.2453}},
                "address_components": [
                    {"long_name": "Greater Manchester", "types": ["administrative_area_level_2"]},
                    {"long_name": "United Kingdom", "types": ["country"]},
                    {"long_name": "M1 1AD", "types": ["postal_code"]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(outcode(&manchester), None);
    }

    #[test]
    fn outcode_without_postcode_is_none() {
        let mut result = canary_wharf();
        result.address_components.retain(|c| !c.types.iter().any(|t| t == "postal_code"));
        assert_eq!(outcode(&result), None);
    }
}
