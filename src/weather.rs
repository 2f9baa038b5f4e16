//! Current weather via the Open-Meteo forecast API

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use crate::config::UpstreamConfig;
use crate::models::WeatherSnapshot;
use crate::upstream::{build_client, send_json};
use crate::{Result, UpstreamService};

/// Fetches a current-weather snapshot for a coordinate
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot>;
}

/// Open-Meteo forecast client
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = build_client(
            UpstreamService::Weather,
            config.weather_timeout(),
            &config.user_agent,
        )?;

        Ok(Self {
            client,
            base_url: config.weather_url.clone(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        info!(
            "Getting current weather for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );

        let latitude = latitude.to_string();
        let longitude = longitude.to_string();
        let request = self.client.get(&self.base_url).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current_weather", "true"),
            ("hourly", "precipitation_probability"),
            ("timezone", "UTC"),
        ]);

        let response: openmeteo::ForecastResponse =
            send_json(UpstreamService::Weather, request).await?;

        Ok(WeatherSnapshot::from(response))
    }
}

/// `OpenMeteo` API response structures and conversion
mod openmeteo {
    use serde::Deserialize;

    use crate::models::WeatherSnapshot;

    /// Forecast response; every block may be missing
    #[derive(Debug, Default, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub current_weather: Option<CurrentWeather>,
        #[serde(default)]
        pub hourly: Option<HourlyData>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct CurrentWeather {
        #[serde(default)]
        pub temperature: Option<f64>,
        #[serde(default)]
        pub windspeed: Option<f64>,
        #[serde(default)]
        pub weathercode: Option<i64>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct HourlyData {
        #[serde(default)]
        pub precipitation_probability: Option<Vec<Option<i64>>>,
    }

    impl From<ForecastResponse> for WeatherSnapshot {
        fn from(response: ForecastResponse) -> Self {
            let current = response.current_weather.unwrap_or_default();

            // First hourly bucket only, i.e. the next-hour probability
            let precipitation_probability = response
                .hourly
                .and_then(|hourly| hourly.precipitation_probability)
                .and_then(|series| series.first().copied().flatten());

            WeatherSnapshot::new(
                current.temperature,
                current.windspeed,
                current.weathercode,
                precipitation_probability,
            )
        }
    }

}
