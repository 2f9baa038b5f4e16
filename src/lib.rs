//! `TourGuide` - natural-language travel assistant
//!
//! This library interprets free-text travel queries, resolves the place with
//! Nominatim, fetches current weather from Open-Meteo and nearby points of
//! interest from Overpass, and composes a single human-readable reply.

pub mod api;
pub mod config;
pub mod error;
pub mod geocode;
pub mod interpreter;
pub mod logging;
pub mod message;
pub mod models;
pub mod orchestrator;
pub mod places;
mod upstream;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use crate::config::{TourGuideConfig, UpstreamFailurePolicy};
pub use error::{TourGuideError, UpstreamService};
pub use geocode::{Geocoder, NominatimClient};
pub use interpreter::QueryInterpreter;
pub use models::{GeoLocation, Intent, PlaceNotFound, PlanResponse, PlanResult, WeatherSnapshot};
pub use orchestrator::Orchestrator;
pub use places::{OverpassClient, PlacesSource};
pub use weather::{OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourGuideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
