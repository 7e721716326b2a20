use std::fmt;
use std::fmt::Formatter;

pub mod config;
pub mod dataset;

/// A travel method queried independently against the commute API
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum TravelMode {
    Driving,
    Transit,
    Bicycling,
    Walking,
}

impl TravelMode {
    // Fixed query order. Both fetcher variants walk this list, so cache
    // entries always carry the same set of labels.
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Transit,
        TravelMode::Bicycling,
        TravelMode::Walking,
    ];

    /// The value the external API expects in its `mode` parameter
    pub fn api_name(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Walking => "walking",
        }
    }

    /// Display label. "transit" is relabelled to "public transport",
    /// which is also the label stored inside cache entries.
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Transit => "public transport",
            other => other.api_name(),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
