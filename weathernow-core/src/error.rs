use thiserror::Error;

/// Failures of the geocoding and weather endpoints.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The endpoint answered with a non-success status.
    #[error("HTTP error! Status: {status}")]
    Network { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, timeout...).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Geocoding returned an empty list.
    #[error("No matching location found.")]
    NoMatch,
}

impl WeatherError {
    /// HTTP status of a `Network` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Network { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of the position capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied: {0}")]
    Denied(String),

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}
