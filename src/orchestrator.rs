//! Query pipeline
//!
//! Interprets the text, geocodes the candidate place, then fetches weather
//! and points of interest concurrently according to the query intent and
//! assembles a single [`PlanResponse`].

use std::sync::Arc;

use futures::future;
use tracing::{debug, info, instrument, warn};

use crate::config::{QueryConfig, TourGuideConfig, UpstreamFailurePolicy};
use crate::geocode::{Geocoder, NominatimClient};
use crate::interpreter::QueryInterpreter;
use crate::message::compose_message;
use crate::models::{GeoLocation, Intent, PlaceNotFound, PlanResponse, PlanResult, WeatherSnapshot};
use crate::places::{OverpassClient, PlacesSource};
use crate::weather::{OpenMeteoClient, WeatherSource};
use crate::Result;

type Sections = (Option<WeatherSnapshot>, Option<Vec<String>>);

/// Coordinates interpretation, geocoding and the weather/places fan-out
pub struct Orchestrator {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
    places: Arc<dyn PlacesSource>,
    settings: QueryConfig,
}

impl Orchestrator {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
        places: Arc<dyn PlacesSource>,
        settings: QueryConfig,
    ) -> Self {
        Self {
            geocoder,
            weather,
            places,
            settings,
        }
    }

    /// Wire the Nominatim, Open-Meteo and Overpass clients from configuration
    pub fn from_config(config: &TourGuideConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(NominatimClient::new(&config.upstream)?),
            Arc::new(OpenMeteoClient::new(&config.upstream)?),
            Arc::new(OverpassClient::new(&config.upstream)?),
            config.query.clone(),
        ))
    }

    /// Handle one free-text query.
    ///
    /// An unknown place is a regular [`PlanResponse::NotFound`]; upstream
    /// failures are errors (or omitted sections under
    /// [`UpstreamFailurePolicy::Partial`]).
    #[instrument(skip(self))]
    pub async fn handle(&self, text: &str) -> Result<PlanResponse> {
        let candidate =
            QueryInterpreter::extract_place(text).unwrap_or_else(|| text.trim().to_string());
        let place =
            QueryInterpreter::apply_default_region(&candidate, &self.settings.default_region);
        debug!("Extracted place candidate '{}' -> '{}'", candidate, place);

        let Some(location) = self.geocoder.resolve(&place, 1).await?.into_iter().next() else {
            info!("No place found for '{}'", place);
            return Ok(PlanResponse::NotFound(PlaceNotFound::for_place(&place)));
        };
        info!(
            "Resolved '{}' to {} ({})",
            place,
            location.display_name,
            location.format_coordinates()
        );

        // Intent comes from the full text, not the extracted candidate
        let intent = QueryInterpreter::classify_intent(text);
        debug!("Query intent: {:?}", intent);

        let (weather, places) = self.fetch_sections(&location, intent).await?;
        let message = compose_message(&location, weather.as_ref(), places.as_deref());

        Ok(PlanResponse::Found(PlanResult {
            place_queried: location.display_name,
            latitude: location.latitude,
            longitude: location.longitude,
            weather,
            places,
            message,
        }))
    }

    /// Run the requested fetches concurrently
    async fn fetch_sections(&self, location: &GeoLocation, intent: Intent) -> Result<Sections> {
        let (latitude, longitude) = (location.latitude, location.longitude);

        let weather = async {
            if intent.wants_weather() {
                self.weather.fetch(latitude, longitude).await.map(Some)
            } else {
                Ok(None)
            }
        };

        let places = async {
            if intent.wants_places() {
                self.places
                    .fetch(
                        latitude,
                        longitude,
                        self.settings.places_radius_meters,
                        self.settings.places_limit,
                    )
                    .await
                    .map(Some)
            } else {
                Ok(None)
            }
        };

        match self.settings.upstream_failure {
            // try_join drops the sibling future as soon as one fails
            UpstreamFailurePolicy::Abort => future::try_join(weather, places).await,
            UpstreamFailurePolicy::Partial => {
                let (weather, places) = future::join(weather, places).await;
                Ok((omit_on_failure(weather, "weather"), omit_on_failure(places, "places")))
            }
        }
    }
}

fn omit_on_failure<T>(result: Result<Option<T>>, section: &str) -> Option<T> {
    result.unwrap_or_else(|e| {
        warn!("Omitting {} section: {}", section, e);
        None
    })
}
