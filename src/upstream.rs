//! Shared request execution for the upstream clients
//!
//! One attempt per call: no retry, no backoff. Each client owns a
//! `reqwest::Client` built with its own timeout and the configured
//! user agent.

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::{Result, TourGuideError, UpstreamService};

/// Build the HTTP client for one upstream
pub(crate) fn build_client(
    service: UpstreamService,
    timeout: Duration,
    user_agent: &str,
) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| {
            TourGuideError::config(format!("Failed to create {service} HTTP client: {e}"))
        })
}

/// Send the request once and decode a JSON body.
///
/// Non-success statuses become [`TourGuideError::Upstream`] carrying only the
/// status line; the body is logged at debug level and never surfaced.
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: UpstreamService,
    request: RequestBuilder,
) -> Result<T> {
    let start_time = Instant::now();

    let response = request.send().await.map_err(|e| {
        error!("{} request failed: {}", service, e);
        TourGuideError::from_reqwest(service, &e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("{} returned HTTP {}", service, status);
        debug!("{} error body: {}", service, body);
        return Err(TourGuideError::upstream(service, format!("HTTP {status}")));
    }

    let parsed = response.json::<T>().await.map_err(|e| {
        error!("Failed to parse {} response: {}", service, e);
        TourGuideError::from_reqwest(service, &e)
    })?;

    let elapsed = start_time.elapsed();
    debug!(
        "{} responded in {:.3}s",
        service,
        elapsed.as_secs_f64()
    );
    if elapsed.as_secs() > 5 {
        warn!("Slow {} response: {:.3}s", service, elapsed.as_secs_f64());
    }

    Ok(parsed)
}
