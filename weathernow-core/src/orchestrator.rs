//! Search/fetch coordination.
//!
//! The [`Orchestrator`] owns all mutable lookup state: the unit system, the last
//! resolved coordinates, the current snapshot, the loading flag and the error
//! message. Handles are cheap to clone and every trigger takes `&self`, so a
//! unit toggle can be issued while a search is still in flight.
//!
//! Each fetch is tagged with a generation number when it starts. Only the
//! most recently started fetch may write its outcome; results of superseded
//! fetches are dropped.

use parking_lot::Mutex;
use std::{fmt, sync::Arc};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::{
    error::WeatherError,
    location::LocationSource,
    model::{Coordinates, FetchState, TemperatureUnit, WeatherSnapshot},
    provider::WeatherProvider,
};

pub const SEARCH_FAILED: &str = "Invalid location. Please search for a valid city.";
pub const LOCATION_DENIED: &str = "Location access denied. Enable location to use this feature.";
pub const LOCATION_WEATHER_FAILED: &str = "Unable to fetch weather for your location.";
pub const REFRESH_FAILED: &str = "Unable to refresh weather details.";

/// Coarse view of the lookup, derived from the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub unit: TemperatureUnit,
    pub coordinates: Option<Coordinates>,
    pub snapshot: Option<Arc<WeatherSnapshot>>,
    pub fetch: FetchState,
}

impl ViewState {
    /// Loading wins over an error, which wins over a retained snapshot.
    pub fn phase(&self) -> Phase {
        if self.fetch.is_loading {
            Phase::Loading
        } else if let Some(message) = &self.fetch.error_message {
            Phase::Error(message.clone())
        } else if self.snapshot.is_some() {
            Phase::Loaded
        } else {
            Phase::Idle
        }
    }
}

#[derive(Debug, Default)]
struct State {
    unit: TemperatureUnit,
    last_coords: Option<Coordinates>,
    snapshot: Option<Arc<WeatherSnapshot>>,
    is_loading: bool,
    error_message: Option<String>,
    generation: u64,
}

struct Inner {
    provider: Arc<dyn WeatherProvider>,
    locator: Arc<dyn LocationSource>,
    state: Mutex<State>,
    published: watch::Sender<Option<Arc<WeatherSnapshot>>>,
}

#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.inner.provider)
            .field("locator", &self.inner.locator)
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        locator: Arc<dyn LocationSource>,
        unit: TemperatureUnit,
    ) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                provider,
                locator,
                state: Mutex::new(State { unit, ..State::default() }),
                published,
            }),
        }
    }

    /// Startup: behaves like one press of "use my location".
    pub async fn mount(&self) {
        self.use_my_location().await;
    }

    /// Look up free text. Blank input is ignored entirely.
    pub async fn search(&self, text: &str) {
        let query = text.trim();
        if query.is_empty() {
            return;
        }

        let generation = self.begin();
        info!(query, "Searching location");

        let outcome = self.search_then_fetch(query).await.map_err(|err| {
            error!("Fetch error: {err}");
            SEARCH_FAILED
        });
        self.finish(generation, outcome);
    }

    async fn search_then_fetch(&self, query: &str) -> Result<WeatherSnapshot, WeatherError> {
        let matches = self.inner.provider.geocode(query).await?;
        let best = matches.first().ok_or(WeatherError::NoMatch)?;
        debug!(name = %best.name, country = %best.country, "Geocoded");

        self.fetch_at(best.coordinates()).await
    }

    /// Look up the device's own position.
    pub async fn use_my_location(&self) {
        let generation = self.begin();
        info!("Acquiring location");

        let coords = match self.inner.locator.acquire_location().await {
            Ok(coords) => coords,
            Err(err) => {
                error!("Geolocation error: {err}");
                self.finish(generation, Err(LOCATION_DENIED));
                return;
            }
        };

        let outcome = self.fetch_at(coords).await.map_err(|err| {
            error!("Fetch error: {err}");
            LOCATION_WEATHER_FAILED
        });
        self.finish(generation, outcome);
    }

    /// Switch unit systems, refetching at the last coordinates if there are any.
    pub async fn set_unit(&self, unit: TemperatureUnit) {
        let coords = {
            let mut state = self.inner.state.lock();
            if state.unit == unit {
                return;
            }
            state.unit = unit;
            state.last_coords
        };

        let Some(coords) = coords else {
            debug!(%unit, "Unit changed before any location was resolved");
            return;
        };

        let generation = self.begin();
        info!(%unit, "Refreshing weather for new unit");

        let outcome = self
            .inner
            .provider
            .fetch_current_weather(coords, unit)
            .await
            .map_err(|err| {
                error!("Fetch error: {err}");
                REFRESH_FAILED
            });
        self.finish(generation, outcome);
    }

    /// Hide the current error message.
    pub fn dismiss_error(&self) {
        self.inner.state.lock().error_message = None;
    }

    /// Receives every snapshot that gets applied.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<WeatherSnapshot>>> {
        self.inner.published.subscribe()
    }

    pub fn view(&self) -> ViewState {
        let state = self.inner.state.lock();
        ViewState {
            unit: state.unit,
            coordinates: state.last_coords,
            snapshot: state.snapshot.clone(),
            fetch: FetchState {
                is_loading: state.is_loading,
                error_message: state.error_message.clone(),
            },
        }
    }

    pub fn phase(&self) -> Phase {
        self.view().phase()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.view().fetch
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.inner.state.lock().unit
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.inner.state.lock().last_coords
    }

    pub fn snapshot(&self) -> Option<Arc<WeatherSnapshot>> {
        self.inner.state.lock().snapshot.clone()
    }

    async fn fetch_at(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        // Coordinates are remembered before the request so a unit toggle reuses them.
        // Unit and coordinates share one lock: a toggle either lands before and is
        // used here, or lands after and refetches itself.
        let unit = {
            let mut state = self.inner.state.lock();
            state.last_coords = Some(coords);
            state.unit
        };
        self.inner.provider.fetch_current_weather(coords, unit).await
    }

    fn begin(&self) -> u64 {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        state.is_loading = true;
        state.error_message = None;
        state.generation
    }

    fn finish(&self, generation: u64, outcome: Result<WeatherSnapshot, &'static str>) {
        let mut state = self.inner.state.lock();
        if state.generation != generation {
            debug!(generation, latest = state.generation, "Discarding stale fetch result");
            return;
        }

        state.is_loading = false;
        match outcome {
            Ok(snapshot) => {
                info!(name = %snapshot.name, country = %snapshot.sys.country, "Weather loaded");
                let snapshot = Arc::new(snapshot);
                state.snapshot = Some(Arc::clone(&snapshot));
                self.inner.published.send_replace(Some(snapshot));
            }
            Err(message) => state.error_message = Some(message.to_string()),
        }
    }
}
