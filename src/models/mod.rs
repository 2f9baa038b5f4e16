//! Data models for `TourGuide`
//!
//! This module contains the core domain models organized by concern:
//! - Location: resolved coordinates and display name
//! - Weather: current conditions snapshot
//! - Intent: which data categories a query asks for
//! - Response: the assembled plan or the not-found outcome

pub mod intent;
pub mod location;
pub mod response;
pub mod weather;

// Re-export all public types for convenient access
pub use intent::Intent;
pub use location::GeoLocation;
pub use response::{PlaceNotFound, PlanResponse, PlanResult};
pub use weather::WeatherSnapshot;
