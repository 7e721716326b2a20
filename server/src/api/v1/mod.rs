pub mod areas;
pub mod commute;
pub mod filters;
pub mod geocode;
pub mod places;
pub mod types;
