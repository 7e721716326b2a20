use crate::api::v1::types::{NearbyQuery, NearbyResponse};
use crate::AppData;
use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

pub(crate) async fn endpoint(
    State(app_data): State<Arc<AppData>>,
    Query(query): Query<NearbyQuery>,
) -> Json<NearbyResponse> {
    let places = app_data.maps
        .places_nearby(query.lat, query.lng, &query.place_type)
        .await;

    Json(NearbyResponse { places })
}
