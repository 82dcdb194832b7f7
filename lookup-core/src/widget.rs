use crate::{
    config::Config,
    location::LocationProvider,
    lookup::{Lookup, LookupRun},
    render::{self, RenderOptions},
    state::{Page, PageHandle},
    suggest::SuggestionController,
    theme::Theme,
};

/// The lookup widget: one method per UI event of the page.
#[derive(Debug)]
pub struct Widget {
    lookup: Lookup,
    suggestions: SuggestionController,
    render: RenderOptions,
}

impl Widget {
    pub fn new(lookup: Lookup, suggestions: SuggestionController) -> Self {
        Self {
            lookup,
            suggestions,
            render: RenderOptions::default(),
        }
    }

    pub fn from_config(config: &Config, theme: Theme) -> anyhow::Result<Self> {
        let page = PageHandle::new(Page {
            theme,
            ..Page::default()
        });
        let lookup = Lookup::from_config(config, page.clone())?;
        let suggestions = SuggestionController::new(lookup.geocoder().clone(), page)
            .with_delay(config.debounce())
            .with_limit(config.suggestion_limit);

        Ok(Self::new(lookup, suggestions).with_render_options(RenderOptions {
            icon_base: config.endpoints.icons.clone(),
        }))
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn page(&self) -> &PageHandle {
        self.lookup.page()
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    /// `input` event on the search box.
    pub fn input(&mut self, text: &str) {
        self.suggestions.on_input(text);
    }

    /// `submit` event on the search form.
    pub async fn submit(&self) -> LookupRun {
        self.lookup.submit().await
    }

    /// Wait for the suggestion refresh armed by the last `input`.
    pub async fn suggestions_settled(&mut self) {
        self.suggestions.settled().await;
    }

    /// Click on the suggestion at `index`; `None` if there is no such entry.
    pub async fn choose_suggestion(&mut self, index: usize) -> Option<LookupRun> {
        self.suggestions.choose(index)?;
        Some(self.lookup.submit().await)
    }

    /// Click anywhere outside the form.
    pub fn click_outside(&self) {
        self.suggestions.dismiss();
    }

    pub async fn geolocate(&self, location: &dyn LocationProvider) -> LookupRun {
        self.lookup.locate(location).await
    }

    pub fn toggle_theme(&self) -> Theme {
        let mut theme = Theme::default();
        self.page().update(|page| {
            page.theme = page.theme.toggled();
            theme = page.theme;
        });
        theme
    }

    /// Current page as markup.
    pub fn render(&self) -> String {
        render::page(&self.page().snapshot(), &self.render)
    }
}
