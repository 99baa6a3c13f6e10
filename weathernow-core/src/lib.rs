//! Core library for the `weathernow` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather geocoding and current-weather client
//! - Position acquisition
//! - The search/locate/unit-change orchestrator
//! - Pure formatters and display projections
//!
//! It is used by `weathernow-cli`, but can also drive other front ends.

pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod location;
pub mod model;
pub mod orchestrator;
pub mod provider;

pub use config::{Config, LocationConfig};
pub use error::{LocationError, WeatherError};
pub use location::{CallbackLocation, ConfiguredLocation, LocationSource};
pub use model::{Coordinates, FetchState, GeocodeResult, TemperatureUnit, WeatherSnapshot};
pub use orchestrator::{Orchestrator, Phase, ViewState};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
