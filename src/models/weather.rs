//! Weather snapshot model

use serde::{Deserialize, Serialize};

/// Current conditions plus the next-hour precipitation probability.
///
/// Every field is optional: Open-Meteo omits values it cannot provide and
/// the snapshot mirrors that instead of inventing defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in Celsius
    pub temperature_c: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// WMO weather interpretation code
    pub weather_code: Option<i64>,
    /// Probability of precipitation for the first hourly bucket (0-100)
    pub precipitation_probability_percent: Option<i64>,
    /// Human-readable description of `weather_code`
    pub conditions: Option<String>,
}

impl WeatherSnapshot {
    /// Build a snapshot, deriving `conditions` from the weather code
    #[must_use]
    pub fn new(
        temperature_c: Option<f64>,
        wind_speed: Option<f64>,
        weather_code: Option<i64>,
        precipitation_probability_percent: Option<i64>,
    ) -> Self {
        Self {
            temperature_c,
            wind_speed,
            weather_code,
            precipitation_probability_percent,
            conditions: weather_code.map(|code| weather_code_to_description(code).to_string()),
        }
    }
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
