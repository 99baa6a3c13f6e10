use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, GeocodeResult, TemperatureUnit, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// The two upstream calls the lookup flow depends on.
///
/// Both are idempotent; no retry happens here.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve free text to at most one best match. An empty list means no match.
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, WeatherError>;

    /// Current conditions at `coords`, in the given unit system.
    async fn fetch_current_weather(
        &self,
        coords: Coordinates,
        unit: TemperatureUnit,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider: Arc<dyn WeatherProvider> = Arc::new(OpenWeatherProvider::from_config(config)?);
    Ok(provider)
}
