use crate::types::dataset::PropertyDataset;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1")]
    Version1 {
        dataset: PropertyDataset,
        cache: CacheConfig,
        #[serde(default)]
        commute: CommuteConfig,
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Backing file for resolved commute durations
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommuteConfig {
    /// Region bias passed to the commute API
    #[serde(default = "default_region")]
    pub region: String,
    /// Pause between commute API calls that were not served from cache
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
}

impl Default for CommuteConfig {
    fn default() -> Self {
        CommuteConfig {
            region: default_region(),
            rate_limit_ms: default_rate_limit_ms(),
        }
    }
}

fn default_region() -> String {
    "uk".to_string()
}

fn default_rate_limit_ms() -> u64 {
    500
}
