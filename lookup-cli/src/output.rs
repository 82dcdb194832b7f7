use std::{fs, path::Path};

use anyhow::Context;
use lookup_core::{Page, UiState, WeatherPanel, render::group_thousands};

/// Plain-text rendering of the page for the terminal.
pub fn text(page: &Page) -> String {
    match &page.state {
        UiState::Idle | UiState::Loading => String::new(),
        UiState::Error(msg) => msg.clone(),
        UiState::Result(card) => {
            let c = &card.country;
            let mut lines = vec![
                c.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                format!("  Capital:    {}", c.capital.as_deref().unwrap_or("N/A")),
                format!(
                    "  Population: {}",
                    c.population.map(group_thousands).unwrap_or_else(|| "N/A".to_string())
                ),
            ];
            if let Some(flag) = &c.flag_url {
                lines.push(format!("  Flag:       {flag}"));
            }

            match &card.weather {
                WeatherPanel::Fetching => lines.push("  Fetching weather...".to_string()),
                WeatherPanel::Unavailable => lines.push("  ⚠️ Weather data not available.".to_string()),
                WeatherPanel::Ready { capital, report } => {
                    let temp = report
                        .temperature
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "N/A".to_string());
                    lines.push(format!("  Weather in {capital}:"));
                    lines.push(format!("    🌡 {temp} °C"));
                    lines.push(format!(
                        "    ☁ {}",
                        report.description.as_deref().unwrap_or("Unknown")
                    ));
                }
            }

            lines.join("\n")
        }
    }
}

pub fn write_html(path: &Path, markup: &str) -> anyhow::Result<()> {
    fs::write(path, markup).with_context(|| format!("Failed to write page: {}", path.display()))
}
