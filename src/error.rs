//! Error types and handling for the `TourGuide` pipeline

use std::fmt;

use thiserror::Error;

/// Upstream service an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamService {
    Geocoding,
    Weather,
    Places,
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpstreamService::Geocoding => "geocoding",
            UpstreamService::Weather => "weather",
            UpstreamService::Places => "places",
        };
        f.write_str(name)
    }
}

/// Main error type for the `TourGuide` application
#[derive(Error, Debug)]
pub enum TourGuideError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream returned a non-success status, failed in transport,
    /// or sent a body that could not be parsed
    #[error("{service} service error: {message}")]
    Upstream {
        service: UpstreamService,
        message: String,
    },

    /// Upstream did not answer within its fixed timeout
    #[error("{service} service timed out")]
    Timeout { service: UpstreamService },
}

impl TourGuideError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(service: UpstreamService, message: S) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    /// Classify a transport error from `reqwest`
    pub fn from_reqwest(service: UpstreamService, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout { service }
        } else if let Some(status) = error.status() {
            Self::upstream(service, format!("HTTP {status}"))
        } else if error.is_decode() {
            Self::upstream(service, "response body could not be decoded")
        } else {
            Self::upstream(service, "request failed")
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Never includes upstream response bodies.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TourGuideError::Config { .. } => {
                "The travel service is misconfigured. Please contact the operator.".to_string()
            }
            TourGuideError::Upstream { .. } | TourGuideError::Timeout { .. } => {
                "The travel service is temporarily unavailable. Please try again later."
                    .to_string()
            }
        }
    }
}
