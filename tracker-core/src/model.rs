use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to record the current weather for a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub city: String,
    /// Carried into the record only; never used to pick the geocoding match.
    pub country: String,
}

impl IngestRequest {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self { city: city.into(), country: country.into() }
    }
}

/// Typed result of the geocode + current weather lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub windspeed_kmh: f64,
    pub observation_time: DateTime<Utc>,
}

/// An observation that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewObservation {
    pub city: String,
    pub country: String,
    pub conditions: CurrentConditions,
}

impl NewObservation {
    pub fn new(request: &IngestRequest, conditions: CurrentConditions) -> Self {
        Self { city: request.city.clone(), country: request.country.clone(), conditions }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: i64,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub windspeed_kmh: f64,
    pub observation_time: DateTime<Utc>,
    pub notes: Option<String>,
}

impl Observation {
    /// Build a stored observation; notes always start unset.
    pub fn new(id: i64, new: NewObservation) -> Self {
        let NewObservation { city, country, conditions } = new;
        Self {
            id,
            city,
            country,
            latitude: conditions.latitude,
            longitude: conditions.longitude,
            temperature_c: conditions.temperature_c,
            windspeed_kmh: conditions.windspeed_kmh,
            observation_time: conditions.observation_time,
            notes: None,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}, {} | {}°C, {} km/h | {} | Notes: {}",
            self.id,
            self.city,
            self.country,
            format_reading(self.temperature_c),
            format_reading(self.windspeed_kmh),
            self.observation_time.format("%Y-%m-%d %H:%M:%S"),
            self.notes.as_deref().unwrap_or("No notes"),
        )
    }
}

/// Render a reading with at least one decimal (`15.0`, not `15`) and a signed,
/// two-digit exponent when one is needed (`1e+16`, `1e-05`).
fn format_reading(value: f64) -> String {
    let repr = format!("{value:?}");
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Body returned after a note update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub id: i64,
    pub notes: String,
}
