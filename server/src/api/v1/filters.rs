use crate::api::v1::types::FilterOptions;
use crate::AppData;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use polars::prelude::*;
use std::sync::Arc;

pub(crate) async fn endpoint(
    State(app_data): State<Arc<AppData>>,
) -> Result<Json<FilterOptions>, (StatusCode, String)> {
    filter_options(&app_data.properties)
        .map(Json)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
}

fn filter_options(properties: &DataFrame) -> PolarsResult<FilterOptions> {
    let prices = properties.column("median_price")?.f64()?;

    Ok(FilterOptions {
        price_min: prices.min(),
        price_max: prices.max(),
        bedrooms: distinct_ints(properties, "bedrooms")?,
        bathrooms: distinct_ints(properties, "bathrooms")?,
        livingrooms: distinct_ints(properties, "livingrooms")?,
        property_types: distinct_strings(properties, "propertytype_converted")?,
        tenures: distinct_strings(properties, "tenure")?,
    })
}

fn distinct_ints(properties: &DataFrame, name: &str) -> PolarsResult<Vec<i64>> {
    let mut values: Vec<i64> = properties.column(name)?.i64()?
        .unique()?
        .into_iter()
        .flatten()
        .collect();
    values.sort_unstable();
    Ok(values)
}

fn distinct_strings(properties: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let mut values: Vec<String> = properties.column(name)?.str()?
        .unique()?
        .into_iter()
        .flatten()
        .map(String::from)
        .collect();
    values.sort_unstable();
    Ok(values)
}
