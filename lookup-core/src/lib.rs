//! Core library for the `lookup` country widget.
//!
//! This crate defines:
//! - Upstream clients (geocoding, country metadata, weather) and their caches
//! - The explicit page state and a pure markup renderer
//! - The submit / geolocate orchestration and debounced suggestions
//!
//! It is used by `lookup-cli`, but can also be driven by any other front end.

pub mod cache;
pub mod config;
pub mod country;
pub mod error;
pub mod geocode;
pub mod http;
pub mod location;
pub mod lookup;
pub mod model;
pub mod render;
pub mod state;
pub mod suggest;
pub mod theme;
pub mod weather;
pub mod widget;

pub use cache::{Cache, Caches};
pub use config::{Config, Endpoints};
pub use error::{FetchError, LocationError, LookupError};
pub use location::{FixedLocation, LocationProvider, NoLocation};
pub use lookup::{Lookup, LookupRun};
pub use model::{Address, Coordinates, CountryRecord, Place, WeatherRecord};
pub use state::{CountryCard, Page, PageHandle, UiState, WeatherPanel};
pub use suggest::SuggestionController;
pub use theme::Theme;
pub use widget::Widget;
