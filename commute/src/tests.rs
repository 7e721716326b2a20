use crate::api::{ApiError, DistanceMatrixApi, ModeDuration};
use crate::cache::{CommuteCache, MemoryStore};
use crate::enrich::CommuteEnricher;
use crate::fetch::{best_commute_time, commute_times_all_modes};
use async_trait::async_trait;
use common::types::TravelMode;
use polars::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scripted distance-matrix responses keyed by (origin, mode). Modes
/// without a script entry fail the way a real zero-result query does.
#[derive(Default, Clone)]
struct ScriptedApi {
    responses: HashMap<(String, TravelMode), ModeDuration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedApi {
    fn respond(&mut self, origin: &str, mode: TravelMode, seconds: u32, text: &str) {
        self.responses.insert(
            (origin.to_string(), mode),
            ModeDuration { seconds, text: text.to_string() },
        );
    }
}

#[async_trait]
impl DistanceMatrixApi for ScriptedApi {
    async fn travel_time(
        &self,
        origin: &str,
        _destination: &str,
        mode: TravelMode,
    ) -> Result<ModeDuration, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(&(origin.to_string(), mode))
            .cloned()
            .ok_or(ApiError::Status("ZERO_RESULTS".to_string()))
    }
}

fn sample_properties() -> DataFrame {
    // Soho and Fitzrovia differ only past the 4th coordinate decimal,
    // so they share a rounded origin (and with it a cache entry)
    df!(
        "area name" => &["Soho", "Fitzrovia", "Camden Town"],
        "outcode" => &["W1", "W1T", "NW1"],
        "ward" => &["West End", "Fitzrovia", "Camden"],
        "latitude" => &[51.513613, 51.513608, 51.539000],
        "longitude" => &[-0.131620, -0.131619, -0.142600],
        "median_price" => &[1_200_000.0, 1_150_000.0, 850_000.0],
    )
    .unwrap()
}

#[tokio::test]
async fn best_mode_prefers_fastest_and_relabels_transit() {
    let mut api = ScriptedApi::default();
    api.respond("51.5074, -0.1278", TravelMode::Driving, 1200, "20 mins");
    api.respond("51.5074, -0.1278", TravelMode::Transit, 900, "15 mins");
    api.respond("51.5074, -0.1278", TravelMode::Walking, 3600, "1 hour 0 mins");

    let best = best_commute_time(&api, "51.5074, -0.1278", "canary wharf").await;

    assert_eq!(best, Some(("public transport", "15.0 mins".to_string())));
}

#[tokio::test]
async fn best_mode_with_no_successful_mode_is_none() {
    let api = ScriptedApi::default();

    let best = best_commute_time(&api, "51.5074, -0.1278", "canary wharf").await;

    assert_eq!(best, None);
}

#[tokio::test]
async fn all_modes_collects_successes_and_failures() {
    let mut api = ScriptedApi::default();
    api.respond("origin", TravelMode::Driving, 1200, "20 mins");
    api.respond("origin", TravelMode::Transit, 900, "15 mins");

    let outcomes = commute_times_all_modes(&api, "origin", "canary wharf").await;

    assert_eq!(outcomes.durations.get("driving"), Some(&"20 mins".to_string()));
    assert_eq!(outcomes.durations.get("public transport"), Some(&"15 mins".to_string()));
    assert_eq!(outcomes.durations.len(), 2);
    // bicycling and walking had no script entry
    assert_eq!(outcomes.failures.len(), 2);
}

#[tokio::test]
async fn enrich_fetches_once_per_rounded_origin() {
    let mut api = ScriptedApi::default();
    api.respond("51.5136, -0.1316", TravelMode::Driving, 1080, "18 mins");
    api.respond("51.5136, -0.1316", TravelMode::Transit, 720, "12 mins");
    api.respond("51.5390, -0.1426", TravelMode::Driving, 1500, "25 mins");
    let calls = api.calls.clone();

    let cache = CommuteCache::open(Box::new(MemoryStore::default())).unwrap();
    let mut enricher = CommuteEnricher::new(cache, Box::new(api), Duration::ZERO);

    let enriched = enricher
        .enrich(&sample_properties(), " Canary Wharf ")
        .await
        .unwrap();

    // Soho and Fitzrovia collapse onto one rounded origin: one round
    // of 4 mode queries for it, one for Camden Town. Fitzrovia is
    // served from the entry Soho's fetch put in the cache.
    assert_eq!(calls.load(Ordering::SeqCst), 8);
    assert_eq!(enriched.height(), 3);

    let areas = enriched.column("area name").unwrap().str().unwrap();
    let modes = enriched.column("best_mode").unwrap().str().unwrap();
    let minutes = enriched.column("duration_mins").unwrap().u32().unwrap();
    for i in 0..enriched.height() {
        match areas.get(i).unwrap() {
            "Soho" | "Fitzrovia" => {
                assert_eq!(modes.get(i), Some("public transport"));
                assert_eq!(minutes.get(i), Some(12));
            }
            "Camden Town" => {
                assert_eq!(modes.get(i), Some("driving"));
                assert_eq!(minutes.get(i), Some(25));
            }
            other => panic!("unexpected area {other}"),
        }
    }
}

#[tokio::test]
async fn second_pass_is_served_from_cache() {
    let mut api = ScriptedApi::default();
    api.respond("51.5136, -0.1316", TravelMode::Transit, 720, "12 mins");
    api.respond("51.5390, -0.1426", TravelMode::Driving, 1500, "25 mins");
    let calls = api.calls.clone();

    let store = MemoryStore::default();
    let cache = CommuteCache::open(Box::new(store.clone())).unwrap();
    let mut enricher = CommuteEnricher::new(cache, Box::new(api), Duration::ZERO);

    enricher.enrich(&sample_properties(), "canary wharf").await.unwrap();
    let calls_after_first = calls.load(Ordering::SeqCst);

    // New entries were flushed under normalized keys
    let persisted = store.snapshot();
    assert!(persisted.contains_key("51.5136, -0.1316|canary wharf"));
    assert!(persisted.contains_key("51.5390, -0.1426|canary wharf"));

    enricher.enrich(&sample_properties(), "Canary Wharf").await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), calls_after_first);
}

#[tokio::test]
async fn rows_without_commute_data_keep_null_fields() {
    let mut api = ScriptedApi::default();
    // Only Soho resolves; every Camden Town mode fails
    api.respond("51.5136, -0.1316", TravelMode::Walking, 540, "9 mins");

    let cache = CommuteCache::open(Box::new(MemoryStore::default())).unwrap();
    let mut enricher = CommuteEnricher::new(cache, Box::new(api), Duration::ZERO);

    let enriched = enricher
        .enrich(&sample_properties(), "canary wharf")
        .await
        .unwrap();

    assert_eq!(enriched.height(), 3);
    let areas = enriched.column("area name").unwrap().str().unwrap();
    let minutes = enriched.column("duration_mins").unwrap().u32().unwrap();
    for i in 0..enriched.height() {
        match areas.get(i).unwrap() {
            "Soho" | "Fitzrovia" => assert_eq!(minutes.get(i), Some(9)),
            "Camden Town" => assert_eq!(minutes.get(i), None),
            other => panic!("unexpected area {other}"),
        }
    }
}

#[tokio::test]
async fn unparseable_durations_are_excluded_from_best_mode() {
    let mut api = ScriptedApi::default();
    api.respond("51.5136, -0.1316", TravelMode::Driving, 600, "N/A");
    api.respond("51.5136, -0.1316", TravelMode::Walking, 2700, "45 mins");
    api.respond("51.5390, -0.1426", TravelMode::Driving, 60, "garbled");

    let cache = CommuteCache::open(Box::new(MemoryStore::default())).unwrap();
    let mut enricher = CommuteEnricher::new(cache, Box::new(api), Duration::ZERO);

    let enriched = enricher
        .enrich(&sample_properties(), "canary wharf")
        .await
        .unwrap();

    let areas = enriched.column("area name").unwrap().str().unwrap();
    let modes = enriched.column("best_mode").unwrap().str().unwrap();
    for i in 0..enriched.height() {
        match areas.get(i).unwrap() {
            // driving reported a smaller duration but its text is unusable
            "Soho" | "Fitzrovia" => assert_eq!(modes.get(i), Some("walking")),
            "Camden Town" => assert_eq!(modes.get(i), None),
            other => panic!("unexpected area {other}"),
        }
    }
}
