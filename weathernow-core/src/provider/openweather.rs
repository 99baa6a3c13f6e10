use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, GeocodeResult, TemperatureUnit, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const GEOCODE_PATH: &str = "geo/1.0/direct";
const WEATHER_PATH: &str = "data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    geocode_url: Url,
    weather_url: Url,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: &str) -> anyhow::Result<Self> {
        Self::build(api_key, base_url, Client::new())
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key().unwrap_or_else(|| {
            warn!("No OpenWeather API key configured; upstream requests will be rejected");
            String::new()
        });

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Self::build(api_key, &config.base_url, http)
    }

    fn build(api_key: String, base_url: &str, http: Client) -> anyhow::Result<Self> {
        // A trailing slash keeps `join` from dropping the last path segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalized)
            .with_context(|| format!("Invalid base URL '{base_url}'"))?;
        let endpoint = |path: &str| {
            base.join(path)
                .with_context(|| format!("Invalid base URL '{base_url}' for endpoint '{path}'"))
        };

        Ok(Self {
            api_key,
            geocode_url: endpoint(GEOCODE_PATH)?,
            weather_url: endpoint(WEATHER_PATH)?,
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        debug!(%url, "OpenWeather request");

        let res = self.http.get(url.clone()).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), body = %truncate_body(&body), "OpenWeather request failed");
            return Err(WeatherError::Network {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, WeatherError> {
        self.get_json(
            &self.geocode_url,
            &[
                ("q", query.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.api_key.clone()),
            ],
        )
        .await
    }

    async fn fetch_current_weather(
        &self,
        coords: Coordinates,
        unit: TemperatureUnit,
    ) -> Result<WeatherSnapshot, WeatherError> {
        self.get_json(
            &self.weather_url,
            &[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", unit.as_query().to_string()),
            ],
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
