use std::time::Duration;

use tokio::task::JoinHandle;

use crate::{
    config::{DEFAULT_DEBOUNCE_MS, DEFAULT_SUGGESTION_LIMIT},
    geocode::GeocodingClient,
    model::Place,
    state::PageHandle,
};

/// Debounced place suggestions for the search input.
///
/// Every keystroke re-arms a single timer. Only the timer that survives the
/// full delay starts a fetch; once started, a fetch runs to completion and
/// whichever response resolves last owns the list.
#[derive(Debug)]
pub struct SuggestionController {
    geocoder: GeocodingClient,
    page: PageHandle,
    delay: Duration,
    limit: usize,
    /// Debounce timer; once fired it yields the handle of the fetch it started.
    pending: Option<JoinHandle<JoinHandle<()>>>,
}

impl SuggestionController {
    pub fn new(geocoder: GeocodingClient, page: PageHandle) -> Self {
        Self {
            geocoder,
            page,
            delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            limit: DEFAULT_SUGGESTION_LIMIT,
            pending: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Input event: record the text and (re)arm the debounce timer.
    pub fn on_input(&mut self, text: &str) {
        self.page.update(|page| page.input = text.to_string());
        self.cancel();

        let geocoder = self.geocoder.clone();
        let page = self.page.clone();
        let delay = self.delay;
        let limit = self.limit;
        let query = text.trim().to_string();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached: re-arming aborts only the timer, never a started fetch.
            tokio::spawn(refresh(geocoder, page, query, limit))
        }));
    }

    /// Wait until the last armed timer has fired and its fetch has written
    /// the list. Returns at once if nothing is armed or the timer was cancelled.
    pub async fn settled(&mut self) {
        let Some(timer) = self.pending.take() else {
            return;
        };

        let fetch = match timer.await {
            Ok(fetch) => fetch,
            Err(err) => {
                if !err.is_cancelled() {
                    tracing::warn!(error = %err, "suggestion timer did not complete");
                }
                return;
            }
        };

        if let Err(err) = fetch.await {
            tracing::warn!(error = %err, "suggestion fetch did not complete");
        }
    }

    /// Drop a timer that has not fired yet.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Click outside the form.
    pub fn dismiss(&self) {
        self.page.clear_suggestions();
    }

    /// Suggestion click: put the label into the input and close the list.
    ///
    /// Returns the chosen label; the caller re-runs the submission.
    pub fn choose(&mut self, index: usize) -> Option<String> {
        let label = self.page.snapshot().suggestions.get(index).cloned()?;
        self.cancel();
        self.page.update(|page| {
            page.input = label.clone();
            page.suggestions.clear();
        });
        Some(label)
    }
}

impl Drop for SuggestionController {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn refresh(geocoder: GeocodingClient, page: PageHandle, query: String, limit: usize) {
    if query.is_empty() {
        page.clear_suggestions();
        return;
    }

    match geocoder.search(&query, limit).await {
        Ok(places) => page.set_suggestions(labels(&places)),
        Err(err) => {
            tracing::debug!(query = %query, error = %err, "suggestions unavailable");
            page.clear_suggestions();
        }
    }
}

fn labels(places: &[Place]) -> Vec<String> {
    places
        .iter()
        .map(|p| p.address.clone().unwrap_or_default().label())
        .collect()
}
