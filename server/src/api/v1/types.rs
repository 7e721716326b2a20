use dataset::sort::SortOrder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AreaQuery {
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub livingrooms: Option<i64>,
    pub property_type: Option<String>,
    pub tenure: Option<String>,
    /// Comma-separated school ratings (Good, Outstanding, No info)
    pub school: Option<String>,
    /// Comma-separated crime levels
    pub crime: Option<String>,
    pub work_address: Option<String>,
    pub max_commute: Option<u32>,
    #[serde(default)]
    pub sort: SortOrder,
}

#[derive(Debug, Serialize)]
pub struct AreaResponse {
    pub matches: usize,
    pub warnings: Vec<String>,
    pub areas: Vec<AreaCard>,
}

/// One neighbourhood result card
#[derive(Debug, Serialize)]
pub struct AreaCard {
    pub ward: String,
    pub outcode: String,
    pub district: String,
    pub median_price: Option<f64>,
    pub nearest_station: Option<String>,
    pub crime_level: Option<String>,
    pub top_crimes: Vec<String>,
    pub good_schools: i64,
    pub outstanding_schools: i64,
    pub schools_good: Option<String>,
    pub schools_outstanding: Option<String>,
    pub best_mode: Option<String>,
    pub duration_text: Option<String>,
    pub duration_mins: Option<u32>,
}

/// Distinct widget values for the sidebar
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub bedrooms: Vec<i64>,
    pub bathrooms: Vec<i64>,
    pub livingrooms: Vec<i64>,
    pub property_types: Vec<String>,
    pub tenures: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommuteQuery {
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct CommuteResponse {
    pub best_mode: String,
    pub duration: String,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct OutcodeQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct OutcodeResponse {
    pub outcode: String,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub place_type: String,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub places: Vec<String>,
}
