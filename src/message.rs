//! Natural-language replies
//!
//! [`compose_message`] builds the message carried in every plan;
//! [`chat_reply`] reformats a whole plan for the chat endpoint.

use crate::models::{GeoLocation, PlanResponse, WeatherSnapshot};

const NO_PLACES_NEARBY: &str = "I couldn't find tourist places nearby.";
const NO_PLACES_CHAT: &str = "Sorry, I couldn't find tourist places.";

/// Compose the plan message: weather part first, places part second,
/// joined by a single space.
#[must_use]
pub fn compose_message(
    location: &GeoLocation,
    weather: Option<&WeatherSnapshot>,
    places: Option<&[String]>,
) -> String {
    let mut parts = Vec::new();

    if let Some(weather) = weather {
        let mut part = format!(
            "In {} it's currently {}°C",
            location.short_name(),
            format_temperature(weather.temperature_c)
        );
        match weather.precipitation_probability_percent {
            Some(probability) => {
                part.push_str(&format!(" with a chance of {probability}% to rain."));
            }
            None => part.push('.'),
        }
        parts.push(part);
    }

    if let Some(places) = places {
        if places.is_empty() {
            parts.push(NO_PLACES_NEARBY.to_string());
        } else {
            parts.push(format!(
                "And these are the places you can go:{}",
                bullet_list(places)
            ));
        }
    }

    parts.join(" ")
}

/// Reformat a plan into the single-string chat reply
#[must_use]
pub fn chat_reply(response: &PlanResponse) -> String {
    let result = match response {
        PlanResponse::NotFound(not_found) => return not_found.message.clone(),
        PlanResponse::Found(result) => result,
    };

    match (&result.weather, &result.places) {
        (Some(weather), None) => {
            let temperature = format_temperature(weather.temperature_c);
            match weather.precipitation_probability_percent {
                Some(probability) => format!(
                    "The temperature is {temperature}°C with {probability}% chance of rain."
                ),
                None => format!("The temperature is {temperature}°C."),
            }
        }
        (None, Some(places)) if places.is_empty() => NO_PLACES_CHAT.to_string(),
        (None, Some(places)) => {
            format!("Here are some places you can visit:{}", bullet_list(places))
        }
        _ => result.message.clone(),
    }
}

fn bullet_list(items: &[String]) -> String {
    items.iter().map(|item| format!("\n- {item}")).collect()
}

/// Integral readings keep one decimal ("28.0"), others print as parsed ("28.3")
fn format_temperature(temperature: Option<f64>) -> String {
    match temperature {
        Some(t) if t.is_finite() && t.fract() == 0.0 => format!("{t:.1}"),
        Some(t) => t.to_string(),
        None => "unknown".to_string(),
    }
}
