use crate::api::v1::types::{AreaCard, AreaQuery, AreaResponse};
use crate::AppData;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use dataset::filter::{apply_filter, PropertyFilter};
use dataset::sort::apply_sort;
use polars::prelude::*;
use std::sync::Arc;

pub(crate) async fn endpoint(
    State(app_data): State<Arc<AppData>>,
    Query(query): Query<AreaQuery>,
) -> Result<Json<AreaResponse>, (StatusCode, String)> {
    let mut warnings = Vec::new();

    let work_address = query.work_address.as_deref()
        .map(str::trim)
        .filter(|address| !address.is_empty());

    let table = match work_address {
        Some(address) => {
            let mut enricher = app_data.enricher.lock().await;
            enricher.enrich(&app_data.properties, address).await
                .map_err(internal_error)?
        }
        None => app_data.properties.clone(),
    };

    let filter = PropertyFilter {
        budget_min: query.budget_min,
        budget_max: query.budget_max,
        bedrooms: query.bedrooms,
        bathrooms: query.bathrooms,
        livingrooms: query.livingrooms,
        property_type: query.property_type.clone(),
        tenure: query.tenure.clone(),
        school_ratings: query.school.as_deref().map(split_csv),
        crime_levels: query.crime.as_deref().map(split_csv),
        // A commute ceiling only makes sense once enrichment ran
        max_commute_mins: work_address.and(query.max_commute),
    };

    let outcome = apply_filter(table.lazy(), &filter);
    warnings.extend(outcome.warnings);

    let results = apply_sort(outcome.frame, query.sort)
        .collect()
        .map_err(internal_error)?;

    let areas = collect_cards(&results).map_err(internal_error)?;

    Ok(Json(AreaResponse {
        matches: areas.len(),
        warnings,
        areas,
    }))
}

fn internal_error(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn optional_str<'a>(results: &'a DataFrame, name: &str) -> Option<&'a StringChunked> {
    results.column(name).ok().and_then(|column| column.str().ok())
}

/// Flatten the result frame into response cards
fn collect_cards(results: &DataFrame) -> PolarsResult<Vec<AreaCard>> {
    let wards = results.column("ward")?.str()?;
    let outcodes = results.column("outcode")?.str()?;
    let districts = results.column("district")?.str()?;
    let prices = results.column("median_price")?.f64()?;
    let stations = results.column("nearest_station")?.str()?;
    let crime_levels = results.column("crime_level")?.str()?;
    let num_good = results.column("num_good")?.i64()?;
    let num_outstanding = results.column("num_outstanding")?.i64()?;

    let crime_columns: Vec<&StringChunked> = ["crime_1", "crime_2", "crime_3"]
        .iter()
        .filter_map(|name| optional_str(results, name))
        .collect();
    let schools_good = optional_str(results, "schools_good");
    let schools_outstanding = optional_str(results, "schools_outstanding");

    // Only present after a commute enrichment pass
    let best_modes = optional_str(results, "best_mode");
    let duration_texts = optional_str(results, "duration_text");
    let duration_mins = results.column("duration_mins").ok().and_then(|column| column.u32().ok());

    let mut cards = Vec::with_capacity(results.height());
    for i in 0..results.height() {
        let top_crimes: Vec<String> = crime_columns.iter()
            .filter_map(|column| column.get(i))
            .filter(|crime| !crime.eq_ignore_ascii_case("no info"))
            .map(String::from)
            .collect();

        cards.push(AreaCard {
            ward: wards.get(i).unwrap_or_default().to_string(),
            outcode: outcodes.get(i).unwrap_or_default().to_string(),
            district: districts.get(i).unwrap_or_default().to_string(),
            median_price: prices.get(i),
            nearest_station: stations.get(i).map(String::from),
            crime_level: crime_levels.get(i).map(String::from),
            top_crimes,
            good_schools: num_good.get(i).unwrap_or(0),
            outstanding_schools: num_outstanding.get(i).unwrap_or(0),
            schools_good: schools_good.and_then(|column| column.get(i)).map(String::from),
            schools_outstanding: schools_outstanding.and_then(|column| column.get(i)).map(String::from),
            best_mode: best_modes.and_then(|column| column.get(i)).map(String::from),
            duration_text: duration_texts.and_then(|column| column.get(i)).map(String::from),
            duration_mins: duration_mins.and_then(|column| column.get(i)),
        });
    }

    Ok(cards)
}
