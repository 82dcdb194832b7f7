//! Pure markup rendering. Every function maps state to a `String` and
//! touches nothing else.

use crate::{
    config::Endpoints,
    model::CountryRecord,
    state::{Page, UiState, WeatherPanel},
};

/// Rendering options that are not part of the page state.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub icon_base: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            icon_base: Endpoints::default().icons,
        }
    }
}

pub fn status(state: &UiState) -> String {
    state.error().map(escape).unwrap_or_default()
}

pub fn results(state: &UiState, opts: &RenderOptions) -> String {
    match state {
        UiState::Result(card) => country_card(&card.country, &card.weather, opts),
        _ => String::new(),
    }
}

pub fn country_card(country: &CountryRecord, weather: &WeatherPanel, opts: &RenderOptions) -> String {
    let flag = escape(country.flag_url.as_deref().unwrap_or_default());
    let name = escape(country.name.as_deref().unwrap_or("Unknown"));
    let capital = escape(country.capital.as_deref().unwrap_or("N/A"));
    let population = country
        .population
        .map(group_thousands)
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        r#"<div class="country-card">
  <img class="flag" src="{flag}" alt="{name} flag" />
  <h2>{name}</h2>
  <p><strong>Capital:</strong> {capital}</p>
  <p><strong>Population:</strong> {population}</p>
  <div id="weather">{panel}</div>
</div>"#,
        panel = weather_panel(weather, opts),
    )
}

pub fn weather_panel(panel: &WeatherPanel, opts: &RenderOptions) -> String {
    match panel {
        WeatherPanel::Fetching => "<p>Fetching weather...</p>".to_string(),
        WeatherPanel::Unavailable => "<p>⚠️ Weather data not available.</p>".to_string(),
        WeatherPanel::Ready { capital, report } => {
            let temp = report
                .temperature
                .map(|t| t.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let desc = escape(report.description.as_deref().unwrap_or("Unknown"));

            let mut out = format!(
                "<h3>Weather in {}</h3><p>🌡 {temp} °C</p><p>☁ {desc}</p>",
                escape(capital)
            );
            if let Some(icon) = &report.icon {
                out.push_str(&format!(
                    r#"<img src="{}/{}@2x.png" alt="{desc}" />"#,
                    opts.icon_base.trim_end_matches('/'),
                    escape(icon)
                ));
            }
            out
        }
    }
}

pub fn suggestions(labels: &[String]) -> String {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!(r#"<li data-index="{i}">{}</li>"#, escape(label)))
        .collect()
}

/// The whole widget, bound to the element ids the page script expects.
pub fn page(page: &Page, opts: &RenderOptions) -> String {
    let loader_class = if page.state.is_loading() { "loader" } else { "loader hidden" };

    format!(
        r#"<!DOCTYPE html>
<html>
<body class="{theme}">
<button class="moon">{glyph}</button>
<form id="search-form">
  <input id="q" type="text" value="{input}" autocomplete="off" />
  <ul id="suggestions">{suggestions}</ul>
  <button type="submit">Search</button>
  <button type="button" id="geo-btn">📍</button>
</form>
<p id="status">{status}</p>
<div id="loader" class="{loader_class}"></div>
<div id="results">{results}</div>
</body>
</html>
"#,
        theme = page.theme.as_str(),
        glyph = page.theme.glyph(),
        input = escape(&page.input),
        suggestions = suggestions(&page.suggestions),
        status = status(&page.state),
        results = results(&page.state, opts),
    )
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
