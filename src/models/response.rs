//! Pipeline response model

use serde::{Deserialize, Serialize};

use super::WeatherSnapshot;

/// Outcome of handling one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanResponse {
    /// Geocoding found nothing for the candidate place
    NotFound(PlaceNotFound),
    /// Place resolved and the requested sections assembled
    Found(PlanResult),
}

/// Serialized as `{"error": true, "message": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceNotFound {
    pub error: bool,
    pub message: String,
}

impl PlaceNotFound {
    #[must_use]
    pub fn for_place(place: &str) -> Self {
        Self {
            error: true,
            message: format!("Sorry, I don't know of a place called '{place}'."),
        }
    }
}

/// A resolved place with its optional weather and places sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub place_queried: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub places: Option<Vec<String>>,
    pub message: String,
}

impl PlanResponse {
    /// The user-facing message of either variant
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            PlanResponse::NotFound(not_found) => &not_found.message,
            PlanResponse::Found(result) => &result.message,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlanResponse::NotFound(_))
    }
}
