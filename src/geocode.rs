//! Forward geocoding via Nominatim (OpenStreetMap)
//!
//! Resolves a free-text place name to candidate coordinates. An empty result
//! list is a valid answer meaning "place unknown".

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::UpstreamConfig;
use crate::models::GeoLocation;
use crate::upstream::{build_client, send_json};
use crate::{Result, UpstreamService};

/// Resolves place names to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidates ordered by upstream relevance, at most `limit` of them
    async fn resolve(&self, place: &str, limit: usize) -> Result<Vec<GeoLocation>>;
}

/// Nominatim search client
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

/// One entry of the Nominatim search response.
///
/// Nominatim sends coordinates as strings; numbers are accepted too.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    lat: Option<Value>,
    #[serde(default)]
    lon: Option<Value>,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = build_client(
            UpstreamService::Geocoding,
            config.geocode_timeout(),
            &config.user_agent,
        )?;

        Ok(Self {
            client,
            base_url: config.geocode_url.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn resolve(&self, place: &str, limit: usize) -> Result<Vec<GeoLocation>> {
        info!("Geocoding location: '{}'", place);

        let limit_param = limit.to_string();
        let request = self.client.get(&self.base_url).query(&[
            ("q", place),
            ("format", "json"),
            ("addressdetails", "1"),
            ("limit", limit_param.as_str()),
        ]);

        let places: Vec<NominatimPlace> = send_json(UpstreamService::Geocoding, request).await?;
        let results = to_locations(places, place, limit);

        if results.is_empty() {
            warn!("No results found for location '{}'", place);
        } else {
            debug!(
                "Geocoding results: {:?}",
                results
                    .iter()
                    .map(|r| format!("{} ({})", r.display_name, r.format_coordinates()))
                    .collect::<Vec<_>>()
            );
        }

        Ok(results)
    }
}

/// Convert raw entries, skipping any without usable coordinates.
/// A missing display name falls back to the queried text.
fn to_locations(places: Vec<NominatimPlace>, queried: &str, limit: usize) -> Vec<GeoLocation> {
    places
        .into_iter()
        .filter_map(|place| {
            let latitude = place.lat.as_ref().and_then(coordinate);
            let longitude = place.lon.as_ref().and_then(coordinate);
            match (latitude, longitude) {
                (Some(latitude), Some(longitude)) => Some(GeoLocation::new(
                    latitude,
                    longitude,
                    place.display_name.unwrap_or_else(|| queried.to_string()),
                )),
                _ => {
                    warn!("Skipping geocoding result without coordinates: {:?}", place);
                    None
                }
            }
        })
        .take(limit)
        .collect()
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
