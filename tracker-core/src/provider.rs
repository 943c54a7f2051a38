use crate::{
    Config,
    error::Result,
    model::{CurrentConditions, IngestRequest},
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Source of current conditions for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Geocode `request.city` and fetch the weather at the resolved coordinates.
    ///
    /// Fails with [`crate::TrackerError::CityNotFound`] when the geocoder has no match.
    async fn current_conditions(&self, request: &IngestRequest) -> Result<CurrentConditions>;
}

/// Construct the provider described by config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenMeteoProvider::from_config(&config.api))
}
