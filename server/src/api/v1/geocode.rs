use crate::api::v1::types::{GeocodeQuery, OutcodeQuery, OutcodeResponse};
use crate::AppData;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use commute::geocode::GeocodedAddress;
use std::sync::Arc;

pub(crate) async fn endpoint(
    State(app_data): State<Arc<AppData>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeocodedAddress>, (StatusCode, String)> {
    match app_data.maps.geocode_address(&query.address).await {
        Ok(Some(address)) => Ok(Json(address)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            format!("No geocoding result for '{}'", query.address),
        )),
        Err(err) => Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string())),
    }
}

pub(crate) async fn outcode_endpoint(
    State(app_data): State<Arc<AppData>>,
    Query(query): Query<OutcodeQuery>,
) -> Result<Json<OutcodeResponse>, (StatusCode, String)> {
    match app_data.maps.reverse_geocode_outcode(query.lat, query.lng).await {
        Ok(Some(outcode)) => Ok(Json(OutcodeResponse { outcode })),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            "Coordinate is outside Greater London or has no postcode".to_string(),
        )),
        Err(err) => Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string())),
    }
}
