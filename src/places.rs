//! Nearby points of interest via the Overpass API
//!
//! Sends an Overpass QL query for tourism, historic and park nodes around a
//! coordinate and reduces the returned elements to a short list of names.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::UpstreamConfig;
use crate::upstream::{build_client, send_json};
use crate::{Result, UpstreamService};

/// Tags tried, in order, to name an element
pub const NAME_TAGS: [&str; 4] = ["name", "amenity", "historic", "tourism"];

/// Fetches names of points of interest around a coordinate
#[async_trait]
pub trait PlacesSource: Send + Sync {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<String>>;
}

/// Overpass interpreter client
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl OverpassClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = build_client(
            UpstreamService::Places,
            config.places_timeout(),
            &config.user_agent,
        )?;

        Ok(Self {
            client,
            base_url: config.places_url.clone(),
        })
    }
}

#[async_trait]
impl PlacesSource for OverpassClient {
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<String>> {
        info!(
            "Searching points of interest within {}m of ({:.4}, {:.4})",
            radius_meters, latitude, longitude
        );

        let query = build_query(latitude, longitude, radius_meters, limit);
        debug!("Overpass query: {}", query);

        let request = self.client.post(&self.base_url).body(query);
        let response: OverpassResponse = send_json(UpstreamService::Places, request).await?;

        let names = collect_names(&response.elements, limit);
        info!(
            "Found {} places from {} elements",
            names.len(),
            response.elements.len()
        );
        Ok(names)
    }
}

/// Overpass QL for tourism, historic and park nodes within the radius
#[must_use]
pub fn build_query(latitude: f64, longitude: f64, radius_meters: u32, limit: usize) -> String {
    let around = format!("around:{radius_meters},{latitude},{longitude}");
    format!(
        "[out:json][timeout:25];
(
  node({around})[tourism];
  node({around})[historic];
  node({around})[amenity=park];
  node({around})[leisure=park];
  node({around})[tourism=attraction];
);
out center {limit};
"
    )
}

/// First non-empty value among [`NAME_TAGS`]
fn display_name(tags: &HashMap<String, String>) -> Option<&str> {
    NAME_TAGS
        .iter()
        .find_map(|key| tags.get(*key).filter(|value| !value.is_empty()))
        .map(String::as_str)
}

/// Reduce elements to at most `limit` unique names.
///
/// Collection stops after `limit` raw names, and only then are duplicates
/// dropped, so repeated names consume slots: `["A", "A", "B"]` with a limit
/// of 2 yields `["A"]`.
fn collect_names(elements: &[OverpassElement], limit: usize) -> Vec<String> {
    let mut names: Vec<&str> = Vec::new();
    for element in elements {
        if let Some(name) = display_name(&element.tags) {
            names.push(name);
        }
        if names.len() >= limit {
            break;
        }
    }

    let mut unique: Vec<String> = Vec::new();
    for name in names {
        if !unique.iter().any(|seen| seen == name) {
            unique.push(name.to_string());
        }
        if unique.len() >= limit {
            break;
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn elements(value: serde_json::Value) -> Vec<OverpassElement> {
        serde_json::from_value::<OverpassResponse>(value)
            .unwrap()
            .elements
    }

    fn named(names: &[&str]) -> Vec<OverpassElement> {
        names
            .iter()
            .map(|name| OverpassElement {
                tags: HashMap::from([("name".to_string(), name.to_string())]),
            })
            .collect()
    }

    #[test]
    fn test_duplicates_consume_slots_before_dedup() {
        let names = collect_names(&named(&["Park A", "Park A", "Park B"]), 2);
        assert_eq!(names, vec!["Park A"]);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let names = collect_names(&named(&["Fort", "Lake", "Fort", "Temple"]), 5);
        assert_eq!(names, vec!["Fort", "Lake", "Temple"]);
    }

    #[test]
    fn test_name_tag_priority() {
        let elements = elements(json!({
            "elements": [
                {"type": "node", "tags": {"tourism": "museum", "historic": "castle", "name": "Amber Fort"}},
                {"type": "node", "tags": {"tourism": "viewpoint", "historic": "ruins", "amenity": "bench"}},
                {"type": "node", "tags": {"tourism": "viewpoint", "historic": "ruins"}},
                {"type": "node", "tags": {"tourism": "artwork"}},
                {"type": "node", "tags": {"name": "", "tourism": "zoo"}}
            ]
        }));
        let names = collect_names(&elements, 10);
        assert_eq!(names, vec!["Amber Fort", "bench", "ruins", "artwork", "zoo"]);
    }

    #[test]
    fn test_elements_without_usable_tags_are_skipped() {
        let elements = elements(json!({
            "elements": [
                {"type": "node", "id": 1},
                {"type": "node", "tags": {"leisure": "park"}},
                {"type": "node", "tags": {"name": "City Park"}}
            ]
        }));
        assert_eq!(collect_names(&elements, 5), vec!["City Park"]);
    }

    #[test]
    fn test_missing_elements_key() {
        let elements = elements(json!({"version": 0.6}));
        assert!(collect_names(&elements, 5).is_empty());
    }

    #[test]
    fn test_query_template() {
        let query = build_query(12.97, 77.59, 5000, 5);
        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains("node(around:5000,12.97,77.59)[tourism];"));
        assert!(query.contains("node(around:5000,12.97,77.59)[historic];"));
        assert!(query.contains("node(around:5000,12.97,77.59)[amenity=park];"));
        assert!(query.contains("node(around:5000,12.97,77.59)[leisure=park];"));
        assert!(query.contains("node(around:5000,12.97,77.59)[tourism=attraction];"));
        assert!(query.trim_end().ends_with("out center 5;"));
    }
}
