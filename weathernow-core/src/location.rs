//! Position acquisition behind a single async seam.

use async_trait::async_trait;
use std::fmt::{self, Debug};
use tokio::sync::oneshot;

use crate::{config::LocationConfig, error::LocationError, model::Coordinates};

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn acquire_location(&self) -> Result<Coordinates, LocationError>;
}

/// Fix delivered by a position callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coords: PositionCoords,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionCoords {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionError {
    pub code: PositionErrorCode,
    pub message: String,
}

impl From<PositionError> for LocationError {
    fn from(err: PositionError) -> Self {
        match err.code {
            PositionErrorCode::PermissionDenied => LocationError::Denied(err.message),
            PositionErrorCode::PositionUnavailable | PositionErrorCode::Timeout => {
                LocationError::Unavailable(err.message)
            }
        }
    }
}

/// Completion handle passed to a callback-style position API. Call it once.
pub type PositionCallback = Box<dyn FnOnce(Result<Position, PositionError>) + Send>;

/// Adapts a single-shot, callback-based position API to [`LocationSource`].
pub struct CallbackLocation<F> {
    request: F,
}

impl<F> CallbackLocation<F>
where
    F: Fn(PositionCallback) + Send + Sync,
{
    pub fn new(request: F) -> Self {
        Self { request }
    }
}

impl<F> Debug for CallbackLocation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackLocation").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> LocationSource for CallbackLocation<F>
where
    F: Fn(PositionCallback) + Send + Sync,
{
    async fn acquire_location(&self) -> Result<Coordinates, LocationError> {
        let (tx, rx) = oneshot::channel::<Result<Position, PositionError>>();
        (self.request)(Box::new(move |outcome: Result<Position, PositionError>| {
            // The requester may have given up; nothing to deliver to then.
            let _ = tx.send(outcome);
        }));

        match rx.await {
            Ok(Ok(pos)) => Ok(Coordinates::new(pos.coords.latitude, pos.coords.longitude)),
            Ok(Err(err)) => Err(err.into()),
            Err(_) => Err(LocationError::Unavailable(
                "position request was dropped without an answer".to_string(),
            )),
        }
    }
}

/// Position taken from the `[location]` config section.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredLocation {
    config: LocationConfig,
}

impl ConfiguredLocation {
    pub fn new(config: LocationConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LocationSource for ConfiguredLocation {
    async fn acquire_location(&self) -> Result<Coordinates, LocationError> {
        if !self.config.enabled {
            return Err(LocationError::Denied(
                "location sharing is disabled in the configuration".to_string(),
            ));
        }

        let coords = self.config.coordinates().ok_or_else(|| {
            LocationError::Unavailable("no home coordinates configured".to_string())
        })?;

        if !coords.is_valid() {
            return Err(LocationError::Unavailable(format!(
                "configured coordinates ({coords}) are out of range"
            )));
        }

        Ok(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(enabled: bool, lat: Option<f64>, lon: Option<f64>) -> ConfiguredLocation {
        ConfiguredLocation::new(LocationConfig { enabled, latitude: lat, longitude: lon })
    }

    #[tokio::test]
    async fn configured_location_success() {
        let source = configured(true, Some(51.5074), Some(-0.1278));
        assert_eq!(source.acquire_location().await, Ok(Coordinates::new(51.5074, -0.1278)));
    }

    #[tokio::test]
    async fn configured_location_disabled_is_denied() {
        let source = configured(false, Some(51.5074), Some(-0.1278));
        assert!(matches!(source.acquire_location().await, Err(LocationError::Denied(_))));
    }

    #[tokio::test]
    async fn configured_location_missing_or_invalid_is_unavailable() {
        let missing = configured(true, Some(51.5074), None);
        assert!(matches!(missing.acquire_location().await, Err(LocationError::Unavailable(_))));

        let invalid = configured(true, Some(123.0), Some(0.0));
        assert!(matches!(invalid.acquire_location().await, Err(LocationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn callback_success_resolves_coordinates() {
        let source = CallbackLocation::new(|done: PositionCallback| {
            done(Ok(Position { coords: PositionCoords { latitude: 40.7128, longitude: -74.006 } }));
        });

        assert_eq!(source.acquire_location().await, Ok(Coordinates::new(40.7128, -74.006)));
    }

    #[tokio::test]
    async fn callback_errors_map_by_code() {
        let denied = CallbackLocation::new(|done: PositionCallback| {
            done(Err(PositionError {
                code: PositionErrorCode::PermissionDenied,
                message: "User denied Geolocation".into(),
            }));
        });
        assert_eq!(
            denied.acquire_location().await,
            Err(LocationError::Denied("User denied Geolocation".into()))
        );

        let timeout = CallbackLocation::new(|done: PositionCallback| {
            done(Err(PositionError { code: PositionErrorCode::Timeout, message: "slow".into() }));
        });
        assert_eq!(
            timeout.acquire_location().await,
            Err(LocationError::Unavailable("slow".into()))
        );
    }

    #[tokio::test]
    async fn callback_answered_from_another_task() {
        let source = CallbackLocation::new(|done: PositionCallback| {
            tokio::spawn(async move {
                tokio::task::yield_now().await;
                done(Ok(Position { coords: PositionCoords { latitude: 1.0, longitude: 2.0 } }));
            });
        });

        assert_eq!(source.acquire_location().await, Ok(Coordinates::new(1.0, 2.0)));
    }

    #[tokio::test]
    async fn dropped_callback_is_unavailable() {
        let source = CallbackLocation::new(|done: PositionCallback| drop(done));
        assert!(matches!(source.acquire_location().await, Err(LocationError::Unavailable(_))));
    }
}
