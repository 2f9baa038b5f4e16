//! Location model for geocoded places

use serde::{Deserialize, Serialize};

/// A place resolved by the geocoder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonical, comma-separated display name (locality first)
    pub display_name: String,
}

impl GeoLocation {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, display_name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        }
    }

    /// Leading segment of the display name, e.g. "Paris" for
    /// "Paris, Île-de-France, France"
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .unwrap_or(&self.display_name)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_takes_first_segment() {
        let location = GeoLocation::new(12.97, 77.59, "Bengaluru, Bangalore North, Karnataka, India");
        assert_eq!(location.short_name(), "Bengaluru");
    }

    #[test]
    fn test_short_name_without_comma() {
        let location = GeoLocation::new(0.0, 0.0, "Atlantis");
        assert_eq!(location.short_name(), "Atlantis");
    }

    #[test]
    fn test_format_coordinates() {
        let location = GeoLocation::new(48.856_613, 2.352_222, "Paris");
        assert_eq!(location.format_coordinates(), "48.8566, 2.3522");
    }
}
