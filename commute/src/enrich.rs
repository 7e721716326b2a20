use crate::api::DistanceMatrixApi;
use crate::cache::{cache_key, normalize_destination, CacheError, CommuteCache};
use crate::duration::extract_minutes;
use crate::fetch::{best_commute_time, commute_times_all_modes};
use log::{debug, info};
use polars::prelude::*;
use std::fmt;
use std::fmt::Display;
use std::time::Duration;

/// Owns the cache and the API client for the lifetime of the process.
/// All commute resolution goes through one of these, sequentially.
pub struct CommuteEnricher {
    cache: CommuteCache,
    api: Box<dyn DistanceMatrixApi>,
    rate_limit: Duration,
}

impl CommuteEnricher {
    pub fn new(cache: CommuteCache, api: Box<dyn DistanceMatrixApi>, rate_limit: Duration) -> Self {
        CommuteEnricher { cache, api, rate_limit }
    }

    /// Append best-mode commute columns for `destination` to the
    /// property table. Left join semantics: rows without a resolvable
    /// commute keep null commute fields instead of being dropped.
    pub async fn enrich(
        &mut self,
        properties: &DataFrame,
        destination: &str,
    ) -> Result<DataFrame, EnrichError> {
        let destination = normalize_destination(destination);

        let origins = properties.clone().lazy()
            .select([col("area name"), col("outcode"), col("latitude"), col("longitude")])
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;

        let areas = origins.column("area name")?.str()?;
        let outcodes = origins.column("outcode")?.str()?;
        let lats = origins.column("latitude")?.f64()?;
        let lngs = origins.column("longitude")?.f64()?;

        info!(
            target: "commute",
            "Resolving commute times for {} origins to '{}'",
            origins.height(), destination
        );

        let mut matched_areas: Vec<String> = Vec::new();
        let mut matched_outcodes: Vec<String> = Vec::new();
        let mut best_modes: Vec<String> = Vec::new();
        let mut duration_texts: Vec<String> = Vec::new();
        let mut duration_mins: Vec<u32> = Vec::new();
        let mut fetched = 0usize;

        for i in 0..origins.height() {
            let (Some(area), Some(outcode), Some(lat), Some(lng)) =
                (areas.get(i), outcodes.get(i), lats.get(i), lngs.get(i))
            else {
                continue;
            };

            let key = cache_key(lat, lng, &destination);
            let durations = match self.cache.get(&key) {
                Some(durations) => durations.clone(),
                None => {
                    let origin = format!("{:.4}, {:.4}", lat, lng);
                    let outcomes =
                        commute_times_all_modes(self.api.as_ref(), &origin, &destination).await;
                    for failure in &outcomes.failures {
                        debug!(target: "commute", "{} -> {}: {}", origin, destination, failure);
                    }
                    // Empty results are not cached, so the pair is retried next pass
                    if !outcomes.durations.is_empty() {
                        self.cache.put(key, outcomes.durations.clone());
                        fetched += 1;
                    }
                    // Pause between uncached calls to stay under the provider's rate limit
                    tokio::time::sleep(self.rate_limit).await;
                    outcomes.durations
                }
            };

            let best = durations.iter()
                .filter_map(|(label, text)| {
                    extract_minutes(text).map(|minutes| (label, text, minutes))
                })
                .min_by_key(|(_, _, minutes)| *minutes);
            if let Some((label, text, minutes)) = best {
                matched_areas.push(area.to_string());
                matched_outcodes.push(outcode.to_string());
                best_modes.push(label.clone());
                duration_texts.push(text.clone());
                duration_mins.push(minutes);
            }
        }

        if fetched > 0 {
            self.cache.flush()?;
            info!(target: "commute", "Cached {} new commute entries", fetched);
        }

        let commutes = df!(
            "area name" => matched_areas,
            "outcode" => matched_outcodes,
            "best_mode" => best_modes,
            "duration_text" => duration_texts,
            "duration_mins" => duration_mins,
        )?;

        let enriched = properties.clone().lazy()
            .join(
                commutes.lazy(),
                [col("area name"), col("outcode")],
                [col("area name"), col("outcode")],
                JoinArgs::new(JoinType::Left),
            )
            .collect()?;

        Ok(enriched)
    }

    /// One-off best-mode lookup. Bypasses the cache, like the
    /// single-pair variant it fronts.
    pub async fn best_commute(
        &self,
        origin: &str,
        destination: &str,
    ) -> Option<(&'static str, String)> {
        best_commute_time(self.api.as_ref(), origin, destination).await
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EnrichError {
    Polars(#[from] PolarsError),
    Cache(#[from] CacheError),
}

impl Display for EnrichError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn Display = match self {
            EnrichError::Polars(err) => err,
            EnrichError::Cache(err) => err,
        };
        write!(f, "{}", err)
    }
}
