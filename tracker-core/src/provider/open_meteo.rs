use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::ApiConfig,
    error::{Result, TrackerError},
    model::{CurrentConditions, IngestRequest},
};

use super::WeatherProvider;

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self {
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(api.geocoding_url.as_str(), api.forecast_url.as_str())
    }

    /// Resolve a city to the geocoder's single best match.
    async fn geocode(&self, city: &str) -> Result<OmPlace> {
        let parsed: OmGeocodeResponse = self
            .get_json(
                &self.geocoding_url,
                &[("name", city.to_string()), ("count", "1".to_string())],
                "geocoding",
            )
            .await?;

        parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| TrackerError::CityNotFound(city.to_string()))
    }

    async fn current_weather(&self, place: &OmPlace) -> Result<OmCurrentWeather> {
        let parsed: OmForecastResponse = self
            .get_json(
                &self.forecast_url,
                &[
                    ("latitude", place.latitude.to_string()),
                    ("longitude", place.longitude.to_string()),
                    ("current_weather", "true".to_string()),
                ],
                "forecast",
            )
            .await?;

        parsed.current_weather.ok_or_else(|| {
            TrackerError::malformed("Open-Meteo forecast response has no current_weather")
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(TrackerError::Upstream {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            TrackerError::malformed(format!("Failed to parse Open-Meteo {what} JSON: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    // Absent entirely when nothing matched.
    #[serde(default)]
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    time: String,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: Option<OmCurrentWeather>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current_conditions(&self, request: &IngestRequest) -> Result<CurrentConditions> {
        let place = self.geocode(&request.city).await?;
        let weather = self.current_weather(&place).await?;
        let observation_time = parse_observation_time(&weather.time)?;

        tracing::debug!(
            city = %request.city,
            latitude = place.latitude,
            longitude = place.longitude,
            "Fetched current weather"
        );

        Ok(CurrentConditions {
            latitude: place.latitude,
            longitude: place.longitude,
            temperature_c: weather.temperature,
            windspeed_kmh: weather.windspeed,
            observation_time,
        })
    }
}

/// Parse the reported observation time.
///
/// A trailing `Z` is rewritten to `+00:00` before parsing; seconds are optional. Offset-less
/// values (`2024-01-01T12:00`, Open-Meteo's default GMT output) are taken as UTC.
pub fn parse_observation_time(raw: &str) -> Result<DateTime<Utc>> {
    let normalized = match raw.strip_suffix('Z') {
        Some(stem) => format!("{stem}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(dt.with_timezone(&Utc));
    }

    // RFC 3339 requires seconds; Open-Meteo reports minutes.
    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|ndt| ndt.and_utc())
        .map_err(|_| TrackerError::malformed(format!("Unrecognized observation time '{raw}'")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
