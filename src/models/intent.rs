//! Query intent: which data categories the user asked for

/// Set over {weather, places}. Never empty: a query that names neither
/// category is treated as asking for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    weather: bool,
    places: bool,
}

impl Intent {
    /// Both weather and places
    pub const BOTH: Intent = Intent {
        weather: true,
        places: true,
    };

    /// Build an intent from keyword matches, falling back to both
    #[must_use]
    pub fn from_matches(weather: bool, places: bool) -> Self {
        if weather || places {
            Self { weather, places }
        } else {
            Self::BOTH
        }
    }

    #[must_use]
    pub fn wants_weather(&self) -> bool {
        self.weather
    }

    #[must_use]
    pub fn wants_places(&self) -> bool {
        self.places
    }
}
