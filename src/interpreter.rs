//! Query interpretation
//!
//! Turns free text into a place candidate and an [`Intent`]. Marker phrases
//! and intent keywords are plain data; their order is part of the behavior.

use crate::models::Intent;

/// Phrases that introduce a destination, longest first.
///
/// Matching is plain substring search on the ASCII-lowercased text. The
/// first marker in this order that occurs anywhere wins, and the candidate
/// is the text after its last occurrence. A marker whose candidate trims to
/// nothing falls through to the next one.
pub const PLACE_MARKERS: [&str; 8] = [
    "i am going to",
    "i'm going to",
    "gonna go to",
    "places to",
    "going to",
    "visit",
    "to",
    "in",
];

/// Keywords that ask for weather
pub const WEATHER_KEYWORDS: [&str; 4] = ["weather", "rain", "forecast", "temperature"];

/// Keywords that ask for points of interest
pub const PLACES_KEYWORDS: [&str; 6] = [
    "place",
    "visit",
    "go to",
    "attraction",
    "things to do",
    "places to",
];

const CANDIDATE_PUNCTUATION: [char; 3] = ['.', '?', '!'];
const TOKEN_PUNCTUATION: [char; 4] = ['.', ',', '?', '!'];

/// Stateless interpreter for free-text travel queries
pub struct QueryInterpreter;

impl QueryInterpreter {
    /// Extract a place candidate from free text.
    ///
    /// Returns `None` only when the text yields no usable token.
    #[must_use]
    pub fn extract_place(text: &str) -> Option<String> {
        // ASCII lowercasing keeps byte offsets aligned with `text`
        let lower = text.to_ascii_lowercase();

        for marker in PLACE_MARKERS {
            let Some(index) = lower.rfind(marker) else {
                continue;
            };

            let candidate = text[index + marker.len()..].trim_matches(|c: char| {
                c.is_whitespace() || CANDIDATE_PUNCTUATION.contains(&c)
            });
            // "Bangalore, let's plan" -> "Bangalore"
            let candidate = match candidate.split_once(',') {
                Some((locality, _)) => locality.trim(),
                None => candidate,
            };

            if !candidate.is_empty() {
                return Some(candidate.to_string());
            }
        }

        text.split_whitespace()
            .last()
            .map(|token| token.trim_matches(TOKEN_PUNCTUATION))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    /// Classify which data categories the text asks for
    #[must_use]
    pub fn classify_intent(text: &str) -> Intent {
        let lower = text.to_lowercase();
        let wants_weather = WEATHER_KEYWORDS.iter().any(|k| lower.contains(k));
        let wants_places = PLACES_KEYWORDS.iter().any(|k| lower.contains(k));
        Intent::from_matches(wants_weather, wants_places)
    }

    /// DefaultRegionBias: qualify a bare place name with the configured region.
    ///
    /// "Paris" becomes "Paris, India" with the stock configuration, so an
    /// unqualified name is resolved inside the default region first. Names
    /// that already carry a comma qualifier are left untouched.
    #[must_use]
    pub fn apply_default_region(candidate: &str, default_region: &str) -> String {
        if candidate.contains(',') {
            candidate.to_string()
        } else {
            format!("{candidate}, {default_region}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_markers_are_longest_first() {
        let lengths: Vec<usize> = PLACE_MARKERS.iter().map(|m| m.len()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lengths, sorted);
    }

    #[rstest]
    #[case("I'm going to Bangalore, let's plan.", "Bangalore")]
    #[case("I am going to Goa!", "Goa")]
    #[case("what's the weather in Paris?", "Paris")]
    #[case("We want to visit Jaipur", "Jaipur")]
    #[case("gonna go to   Shimla  ?", "Shimla")]
    #[case("going to Delhi, then going to Agra", "Agra")]
    #[case("just Paris", "Paris")]
    #[case("Mumbai.", "Mumbai")]
    fn test_extract_place(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(QueryInterpreter::extract_place(text).as_deref(), Some(expected));
    }

    #[test]
    fn test_longest_marker_wins_over_closer_shorter_one() {
        // "places to" outranks "in" even though "in" is closer to the name
        assert_eq!(
            QueryInterpreter::extract_place("places to visit in Rome").as_deref(),
            Some("visit in Rome")
        );
    }

    #[test]
    fn test_empty_candidate_falls_through_to_next_marker() {
        // "to" yields nothing after its last occurrence, "in" still does
        assert_eq!(
            QueryInterpreter::extract_place("Weekend in Goa, then back to").as_deref(),
            Some("Goa")
        );
    }

    #[test]
    fn test_markers_match_inside_words() {
        assert_eq!(
            QueryInterpreter::extract_place("tell me about Tokyo").as_deref(),
            Some("kyo")
        );
    }

    #[test]
    fn test_extract_keeps_original_casing() {
        assert_eq!(
            QueryInterpreter::extract_place("I AM GOING TO New York").as_deref(),
            Some("New York")
        );
    }

    #[test]
    fn test_extract_non_ascii_place() {
        assert_eq!(
            QueryInterpreter::extract_place("going to Zürich?").as_deref(),
            Some("Zürich")
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(" ?! ")]
    fn test_extract_nothing(#[case] text: &str) {
        assert_eq!(QueryInterpreter::extract_place(text), None);
    }

    #[test]
    fn test_classify_weather_only() {
        let intent = QueryInterpreter::classify_intent("what's the weather in Paris?");
        assert!(intent.wants_weather());
        assert!(!intent.wants_places());
    }

    #[test]
    fn test_classify_places_only() {
        let intent = QueryInterpreter::classify_intent("places to visit in Rome");
        assert!(!intent.wants_weather());
        assert!(intent.wants_places());
    }

    #[test]
    fn test_classify_defaults_to_both() {
        assert_eq!(
            QueryInterpreter::classify_intent("tell me about Tokyo"),
            Intent::BOTH
        );
    }

    #[test]
    fn test_classify_both_keyword_sets() {
        let intent = QueryInterpreter::classify_intent(
            "I'm going to Goa, what's the TEMPERATURE and which attractions are there?",
        );
        assert_eq!(intent, Intent::BOTH);
    }

    #[rstest]
    #[case("Paris", "Paris, India")]
    #[case("Paris, France", "Paris, France")]
    #[case("New York", "New York, India")]
    fn test_default_region_bias(#[case] candidate: &str, #[case] expected: &str) {
        assert_eq!(
            QueryInterpreter::apply_default_region(candidate, "India"),
            expected
        );
    }
}
