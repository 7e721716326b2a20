use crate::api::v1::types::{CommuteQuery, CommuteResponse};
use crate::AppData;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

pub(crate) async fn endpoint(
    State(app_data): State<Arc<AppData>>,
    Query(query): Query<CommuteQuery>,
) -> Result<Json<CommuteResponse>, (StatusCode, String)> {
    let enricher = app_data.enricher.lock().await;

    match enricher.best_commute(&query.origin, &query.destination).await {
        Some((mode, duration)) => Ok(Json(CommuteResponse {
            best_mode: mode.to_string(),
            duration,
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            "No travel mode returned a commute time".to_string(),
        )),
    }
}
