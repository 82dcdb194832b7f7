//! Explicit UI state and the shared handle every component writes it through.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    model::{CountryRecord, WeatherRecord},
    theme::Theme,
};

/// Weather panel inside a country card.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherPanel {
    Fetching,
    Ready { capital: String, report: WeatherRecord },
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryCard {
    /// Run that produced this card; late weather from other runs is dropped.
    pub run: u64,
    pub country: CountryRecord,
    pub weather: WeatherPanel,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Result(CountryCard),
    Error(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn card(&self) -> Option<&CountryCard> {
        match self {
            UiState::Result(card) => Some(card),
            _ => None,
        }
    }
}

/// Everything the page shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub input: String,
    pub state: UiState,
    pub suggestions: Vec<String>,
    pub theme: Theme,
}

impl Page {
    pub fn suggestions_visible(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

/// Shared, observable page. All writes go through [`PageHandle::update`].
#[derive(Debug, Clone)]
pub struct PageHandle {
    tx: Arc<watch::Sender<Page>>,
}

impl PageHandle {
    pub fn new(page: Page) -> Self {
        let (tx, _rx) = watch::channel(page);
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> Page {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Page> {
        self.tx.subscribe()
    }

    pub fn update(&self, f: impl FnOnce(&mut Page)) {
        self.tx.send_modify(f);
    }

    pub fn set_state(&self, state: UiState) {
        self.update(|page| page.state = state);
    }

    pub fn set_suggestions(&self, labels: Vec<String>) {
        self.update(|page| page.suggestions = labels);
    }

    pub fn clear_suggestions(&self) {
        self.update(|page| page.suggestions.clear());
    }

    /// Fill the weather panel of the card produced by `run`, if it is still shown.
    pub fn apply_weather(&self, run: u64, panel: WeatherPanel) -> bool {
        let mut applied = false;
        self.update(|page| {
            if let UiState::Result(card) = &mut page.state {
                if card.run == run {
                    card.weather = panel;
                    applied = true;
                }
            }
        });
        applied
    }
}

impl Default for PageHandle {
    fn default() -> Self {
        Self::new(Page::default())
    }
}
