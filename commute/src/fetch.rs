use crate::api::{ApiError, DistanceMatrixApi};
use crate::cache::ModeDurations;
use common::types::TravelMode;
use std::fmt;
use std::fmt::Display;

/// Every mode outcome of one multi-modal round trip. Failures stay
/// visible so callers can tell "no commute data" from "API call
/// failed"; the enrichment layer logs them and moves on.
#[derive(Debug, Default)]
pub struct ModeOutcomes {
    pub durations: ModeDurations,
    pub failures: Vec<ModeFailure>,
}

#[derive(Debug)]
pub struct ModeFailure {
    pub mode: TravelMode,
    pub error: ApiError,
}

impl Display for ModeFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} lookup failed: {}", self.mode, self.error)
    }
}

/// Query every travel mode once, in the canonical order. No retries
/// and no backoff: a failed mode is simply absent for this pair.
pub async fn commute_times_all_modes(
    api: &dyn DistanceMatrixApi,
    origin: &str,
    destination: &str,
) -> ModeOutcomes {
    let mut outcomes = ModeOutcomes::default();

    for mode in TravelMode::ALL {
        match api.travel_time(origin, destination, mode).await {
            Ok(duration) => {
                outcomes.durations.insert(mode.label().to_string(), duration.text);
            }
            Err(error) => outcomes.failures.push(ModeFailure { mode, error }),
        }
    }

    outcomes
}

/// Reduce straight to the fastest mode, comparing raw seconds.
/// `None` when not a single mode resolved.
pub async fn best_commute_time(
    api: &dyn DistanceMatrixApi,
    origin: &str,
    destination: &str,
) -> Option<(&'static str, String)> {
    let mut results: Vec<(TravelMode, u32)> = Vec::new();

    for mode in TravelMode::ALL {
        if let Ok(duration) = api.travel_time(origin, destination, mode).await {
            results.push((mode, duration.seconds));
        }
    }

    let (mode, seconds) = results.into_iter().min_by_key(|(_, seconds)| *seconds)?;
    Some((mode.label(), format!("{:.1} mins", f64::from(seconds) / 60.0)))
}
