//! Configuration management for `TourGuide`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. The loaded
//! configuration is read-only for the lifetime of the process and is passed
//! explicitly to every upstream client.

use crate::TourGuideError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for `TourGuide`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourGuideConfig {
    /// Upstream API endpoints and HTTP settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Query interpretation and fan-out settings
    #[serde(default)]
    pub query: QueryConfig,
    /// HTTP surface settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Nominatim search endpoint
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,
    /// Open-Meteo forecast endpoint
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Overpass interpreter endpoint
    #[serde(default = "default_places_url")]
    pub places_url: String,
    /// Descriptive client identifier, required by the OSM usage policies
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_geocode_timeout")]
    pub geocode_timeout_seconds: u32,
    #[serde(default = "default_weather_timeout")]
    pub weather_timeout_seconds: u32,
    /// Overpass queries are slower than the other two upstreams
    #[serde(default = "default_places_timeout")]
    pub places_timeout_seconds: u32,
}

/// What to do when one of the concurrent weather/places fetches fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamFailurePolicy {
    /// Any failed fetch fails the whole request
    #[default]
    Abort,
    /// Failed sections are left out of the response
    Partial,
}

/// Query interpretation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Region appended to place names that carry no comma qualifier
    #[serde(default = "default_region")]
    pub default_region: String,
    /// Radius of the points-of-interest search
    #[serde(default = "default_places_radius")]
    pub places_radius_meters: u32,
    /// Maximum number of points of interest returned
    #[serde(default = "default_places_limit")]
    pub places_limit: usize,
    #[serde(default)]
    pub upstream_failure: UpstreamFailurePolicy,
}

/// HTTP surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_geocode_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_weather_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_places_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_user_agent() -> String {
    format!(
        "tourguide/{} (+https://github.com/tourguide/tourguide)",
        crate::VERSION
    )
}

fn default_geocode_timeout() -> u32 {
    15
}

fn default_weather_timeout() -> u32 {
    15
}

fn default_places_timeout() -> u32 {
    25
}

fn default_region() -> String {
    "India".to_string()
}

fn default_places_radius() -> u32 {
    5000
}

fn default_places_limit() -> usize {
    5
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocode_url: default_geocode_url(),
            weather_url: default_weather_url(),
            places_url: default_places_url(),
            user_agent: default_user_agent(),
            geocode_timeout_seconds: default_geocode_timeout(),
            weather_timeout_seconds: default_weather_timeout(),
            places_timeout_seconds: default_places_timeout(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            places_radius_meters: default_places_radius(),
            places_limit: default_places_limit(),
            upstream_failure: UpstreamFailurePolicy::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for TourGuideConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            query: QueryConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_seconds.into())
    }

    #[must_use]
    pub fn weather_timeout(&self) -> Duration {
        Duration::from_secs(self.weather_timeout_seconds.into())
    }

    #[must_use]
    pub fn places_timeout(&self) -> Duration {
        Duration::from_secs(self.places_timeout_seconds.into())
    }
}

impl TourGuideConfig {
    /// Load configuration from `config_path`, or the default file location
    /// when `None`, then apply environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TOURGUIDE_QUERY__DEFAULT_REGION=France
        builder = builder.add_source(
            Environment::with_prefix("TOURGUIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TourGuideConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tourguide").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.upstream.geocode_url.is_empty() {
            self.upstream.geocode_url = default_geocode_url();
        }
        if self.upstream.weather_url.is_empty() {
            self.upstream.weather_url = default_weather_url();
        }
        if self.upstream.places_url.is_empty() {
            self.upstream.places_url = default_places_url();
        }
        if self.upstream.user_agent.is_empty() {
            self.upstream.user_agent = default_user_agent();
        }
        if self.upstream.geocode_timeout_seconds == 0 {
            self.upstream.geocode_timeout_seconds = default_geocode_timeout();
        }
        if self.upstream.weather_timeout_seconds == 0 {
            self.upstream.weather_timeout_seconds = default_weather_timeout();
        }
        if self.upstream.places_timeout_seconds == 0 {
            self.upstream.places_timeout_seconds = default_places_timeout();
        }
        if self.query.places_radius_meters == 0 {
            self.query.places_radius_meters = default_places_radius();
        }
        if self.query.places_limit == 0 {
            self.query.places_limit = default_places_limit();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings.
    ///
    /// Loaded configs pass through [`Self::apply_defaults`] first, so the
    /// zero/empty checks only fire for configs built in code.
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("geocode_url", &self.upstream.geocode_url),
            ("weather_url", &self.upstream.weather_url),
            ("places_url", &self.upstream.places_url),
        ];

        for (field, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TourGuideError::config(format!(
                    "upstream.{field} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            self.upstream.geocode_timeout_seconds,
            self.upstream.weather_timeout_seconds,
            self.upstream.places_timeout_seconds,
        ];
        if timeouts.iter().any(|t| *t == 0 || *t > 300) {
            return Err(TourGuideError::config(
                "Upstream timeouts must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.query.places_limit == 0 || self.query.places_limit > 50 {
            return Err(
                TourGuideError::config("Places limit must be between 1 and 50").into(),
            );
        }

        if self.query.places_radius_meters > 50_000 {
            return Err(
                TourGuideError::config("Places radius cannot exceed 50000 meters").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        if self.upstream.user_agent.trim().is_empty() {
            return Err(TourGuideError::config(
                "A descriptive user agent is required by the OpenStreetMap usage policies",
            )
            .into());
        }

        if self.query.default_region.trim().is_empty() {
            return Err(TourGuideError::config("Default region cannot be empty").into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourGuideError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourGuideError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TourGuideConfig::default();
        assert_eq!(
            config.upstream.geocode_url,
            "https://nominatim.openstreetmap.org/search"
        );
        assert_eq!(config.upstream.geocode_timeout(), Duration::from_secs(15));
        assert_eq!(config.upstream.weather_timeout(), Duration::from_secs(15));
        assert_eq!(config.upstream.places_timeout(), Duration::from_secs(25));
        assert_eq!(config.query.default_region, "India");
        assert_eq!(config.query.places_radius_meters, 5000);
        assert_eq!(config.query.places_limit, 5);
        assert_eq!(config.query.upstream_failure, UpstreamFailurePolicy::Abort);
        assert!(config.upstream.user_agent.starts_with("tourguide/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_defaults_fills_zeroes() {
        let mut config = TourGuideConfig::default();
        config.upstream.places_timeout_seconds = 0;
        config.query.places_limit = 0;
        config.upstream.user_agent = String::new();
        config.apply_defaults();

        assert_eq!(config.upstream.places_timeout_seconds, 25);
        assert_eq!(config.query.places_limit, 5);
        assert!(!config.upstream.user_agent.is_empty());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TourGuideConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_rejects_bad_url() {
        let mut config = TourGuideConfig::default();
        config.upstream.places_url = "overpass-api.de/api/interpreter".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("upstream.places_url"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TourGuideConfig::default();
        config.upstream.weather_timeout_seconds = 500;
        assert!(config.validate().is_err());

        let mut config = TourGuideConfig::default();
        config.query.places_limit = 51;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Places limit"));
    }

    #[test]
    fn test_config_validation_rejects_large_radius() {
        let mut config = TourGuideConfig::default();
        config.query.places_radius_meters = 50_000;
        assert!(config.validate().is_ok());

        config.query.places_radius_meters = 50_001;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Places radius"));
    }

    #[test]
    fn test_config_validation_invalid_log_format() {
        let mut config = TourGuideConfig::default();
        config.logging.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_validate_catches_unset_fields_in_hand_built_config() {
        let mut config = TourGuideConfig::default();
        config.query.places_limit = 0;
        assert!(config.validate().is_err());

        let mut config = TourGuideConfig::default();
        config.upstream.user_agent = " ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("user agent"));
    }

    #[test]
    fn test_env_overrides_use_double_underscore_nesting() {
        // SAFETY: only this test touches these variables
        unsafe {
            std::env::set_var("TOURGUIDE_QUERY__PLACES_RADIUS_METERS", "2500");
            std::env::set_var("TOURGUIDE_UPSTREAM__USER_AGENT", "env-agent/1.0");
        }

        let missing = std::env::temp_dir().join("tourguide-no-such-config.toml");
        let result = TourGuideConfig::load_from_path(Some(missing));

        unsafe {
            std::env::remove_var("TOURGUIDE_QUERY__PLACES_RADIUS_METERS");
            std::env::remove_var("TOURGUIDE_UPSTREAM__USER_AGENT");
        }

        let config = result.unwrap();
        assert_eq!(config.query.places_radius_meters, 2500);
        assert_eq!(config.upstream.user_agent, "env-agent/1.0");
        assert_eq!(config.query.places_limit, 5);
    }

    #[test]
    fn test_config_validation_empty_region() {
        let mut config = TourGuideConfig::default();
        config.query.default_region = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("tourguide-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[query]\ndefault_region = \"France\"\nupstream_failure = \"partial\"\n\n[server]\nport = 9000"
        )
        .unwrap();

        let config = TourGuideConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.query.default_region, "France");
        assert_eq!(config.query.upstream_failure, UpstreamFailurePolicy::Partial);
        assert_eq!(config.query.places_limit, 5);
        assert_eq!(config.server.port, 9000);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TourGuideConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("tourguide"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
