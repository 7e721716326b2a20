pub mod api;
pub mod cache;
pub mod duration;
pub mod enrich;
pub mod fetch;
pub mod geocode;
pub mod places;

#[cfg(test)]
mod tests;
