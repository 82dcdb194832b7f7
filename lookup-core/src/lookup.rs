//! Submit and geolocate sequences.
//!
//! Both follow the same shape: geocode → country record → card, then a
//! weather task that is spawned and never awaited here. The weather panel
//! is filled whenever that task finishes, which may be after the run has
//! already returned; if a newer run has replaced the card by then the
//! result is dropped.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::task::JoinHandle;

use crate::{
    cache::Caches,
    config::{Config, Endpoints},
    country::CountryClient,
    error::{FetchError, LookupError},
    geocode::GeocodingClient,
    http::HttpClient,
    location::LocationProvider,
    model::{Coordinates, CountryRecord},
    state::{CountryCard, PageHandle, UiState, WeatherPanel},
    weather::WeatherClient,
};

pub const EMPTY_QUERY: &str = "⚠️ Please enter a place.";
pub const GEO_UNSUPPORTED: &str = "⚠️ Geolocation not supported.";
pub const GEO_UNAVAILABLE: &str = "⚠️ Unable to retrieve location.";

pub fn not_found(query: &str) -> String {
    format!("❌ Could not find \"{query}\".")
}

/// Handle to the part of a run that outlives it.
#[derive(Debug, Default)]
pub struct LookupRun {
    weather: Option<JoinHandle<()>>,
}

impl LookupRun {
    pub fn has_pending_weather(&self) -> bool {
        self.weather.is_some()
    }

    /// Wait for the weather task, if one was spawned.
    pub async fn settled(self) {
        if let Some(task) = self.weather {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "weather task did not complete");
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Lookup {
    geocoder: GeocodingClient,
    countries: CountryClient,
    weather: WeatherClient,
    page: PageHandle,
    runs: Arc<AtomicU64>,
}

impl Lookup {
    pub fn from_config(config: &Config, page: PageHandle) -> anyhow::Result<Self> {
        let api_key = config.weather_api_key()?;
        Ok(Self::new(&config.endpoints, api_key, page)?)
    }

    pub fn new(endpoints: &Endpoints, api_key: String, page: PageHandle) -> Result<Self, FetchError> {
        let http = HttpClient::new()?;
        let caches = Caches::new();

        Ok(Self {
            geocoder: GeocodingClient::new(http.clone(), endpoints.geocoding.as_str()),
            countries: CountryClient::new(
                http.clone(),
                endpoints.countries.as_str(),
                caches.countries.clone(),
            ),
            weather: WeatherClient::new(
                http,
                endpoints.weather.as_str(),
                api_key,
                caches.weather.clone(),
            ),
            page,
            runs: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn page(&self) -> &PageHandle {
        &self.page
    }

    pub fn geocoder(&self) -> &GeocodingClient {
        &self.geocoder
    }

    /// Form submission: look up whatever is in the input box.
    pub async fn submit(&self) -> LookupRun {
        let query = self.page.snapshot().input.trim().to_string();
        self.page.clear_suggestions();

        if query.is_empty() {
            self.page.set_state(UiState::Error(EMPTY_QUERY.to_string()));
            return LookupRun::default();
        }

        let run = self.begin();
        tracing::info!(run, query = %query, "search");

        let outcome = match self.search_country(&query).await {
            Ok(Some(country)) => self.show(run, country),
            Ok(None) => {
                self.page.set_state(UiState::Error(not_found(&query)));
                LookupRun::default()
            }
            Err(err) => {
                self.page.set_state(UiState::Error(format!("❌ Error: {err}")));
                LookupRun::default()
            }
        };

        self.finish_loading();
        outcome
    }

    /// Geolocate button: look up the country the device is in.
    pub async fn locate(&self, location: &dyn LocationProvider) -> LookupRun {
        if !location.is_supported() {
            self.page.set_state(UiState::Error(GEO_UNSUPPORTED.to_string()));
            return LookupRun::default();
        }

        let run = self.begin();

        let at = match location.current_position().await {
            Ok(at) => at,
            Err(err) => {
                tracing::warn!(run, error = %err, "position unavailable");
                self.page.set_state(UiState::Error(GEO_UNAVAILABLE.to_string()));
                self.finish_loading();
                return LookupRun::default();
            }
        };
        tracing::info!(run, lat = at.latitude, lon = at.longitude, "locate");

        let outcome = match self.reverse_country(at).await {
            Ok(country) => self.show(run, country),
            Err(err) => {
                self.page
                    .set_state(UiState::Error(format!("❌ Error fetching location: {err}")));
                LookupRun::default()
            }
        };

        self.finish_loading();
        outcome
    }

    async fn search_country(&self, query: &str) -> Result<Option<CountryRecord>, LookupError> {
        let places = self.geocoder.search(query, 1).await?;
        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let code = place.country_key().ok_or(LookupError::MissingCountryCode)?;
        Ok(Some(self.countries.country(&code).await?))
    }

    async fn reverse_country(&self, at: Coordinates) -> Result<CountryRecord, LookupError> {
        let place = self.geocoder.reverse(at).await?;
        let code = place.country_key().ok_or(LookupError::MissingCountryCode)?;
        Ok(self.countries.country(&code).await?)
    }

    fn begin(&self) -> u64 {
        self.page.set_state(UiState::Loading);
        self.runs.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn finish_loading(&self) {
        self.page.update(|page| {
            if page.state.is_loading() {
                page.state = UiState::Idle;
            }
        });
    }

    /// Render the card and spawn the weather fetch for its capital.
    fn show(&self, run: u64, country: CountryRecord) -> LookupRun {
        let capital = country.capital.clone();
        let weather = match capital {
            Some(_) => WeatherPanel::Fetching,
            None => WeatherPanel::Unavailable,
        };

        self.page.set_state(UiState::Result(CountryCard {
            run,
            country,
            weather,
        }));

        let Some(capital) = capital else {
            return LookupRun::default();
        };

        let client = self.weather.clone();
        let page = self.page.clone();
        let task = tokio::spawn(async move {
            let panel = match client.current(&capital).await {
                Some(report) => WeatherPanel::Ready { capital, report },
                None => WeatherPanel::Unavailable,
            };
            if !page.apply_weather(run, panel) {
                tracing::debug!(run, "card replaced before weather arrived");
            }
        });

        LookupRun {
            weather: Some(task),
        }
    }
}
