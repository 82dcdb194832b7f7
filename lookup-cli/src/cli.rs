use std::{path::PathBuf, time::Duration};

use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Password, Select, Text};
use lookup_core::{
    Config, PageHandle, SuggestionController, Theme, Widget,
    geocode::GeocodingClient,
    http::HttpClient,
    location::provider_from_coords,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "lookup", version, about = "Country, flag and capital weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Page theme used for HTML output.
    #[arg(long, global = true, default_value = "dark", value_parser = parse_theme)]
    pub theme: Theme,

    /// Increase log verbosity (-v, -vv). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Look up the country of a place name.
    Search {
        /// Free-text place, e.g. "Lyon" or "Bavaria, Germany".
        query: String,

        /// Write the rendered page to this file instead of printing text.
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Look up the country at a position.
    Locate {
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,

        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Print place suggestions for partial input.
    Suggest {
        text: String,
    },

    /// Type places, pick from suggestions, repeat.
    Interactive,
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::try_from(s).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let theme = self.theme;

        match self.command {
            Command::Configure => configure(),
            Command::Search { query, html } => {
                let widget = Widget::from_config(&Config::load()?, theme)?;
                widget.page().update(|page| page.input = query);
                widget.submit().await.settled().await;
                emit(&widget, html.as_deref())
            }
            Command::Locate { lat, lon, html } => {
                let widget = Widget::from_config(&Config::load()?, theme)?;
                let location = provider_from_coords(lat, lon);
                widget.geolocate(location.as_ref()).await.settled().await;
                emit(&widget, html.as_deref())
            }
            Command::Suggest { text } => suggest(&Config::load()?, &text).await,
            Command::Interactive => interactive(Widget::from_config(&Config::load()?, theme)?).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    config.set_weather_api_key(key.to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn emit(widget: &Widget, html: Option<&std::path::Path>) -> anyhow::Result<()> {
    match html {
        Some(path) => {
            output::write_html(path, &widget.render())?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", output::text(&widget.page().snapshot())),
    }
    Ok(())
}

async fn suggest(config: &Config, text: &str) -> anyhow::Result<()> {
    for label in suggestion_labels(config, text).await? {
        println!("{label}");
    }
    Ok(())
}

async fn suggestion_labels(config: &Config, text: &str) -> anyhow::Result<Vec<String>> {
    let page = PageHandle::default();
    let geocoder = GeocodingClient::new(HttpClient::new()?, config.endpoints.geocoding.as_str());
    let mut controller = SuggestionController::new(geocoder, page.clone())
        .with_delay(Duration::ZERO)
        .with_limit(config.suggestion_limit);

    controller.on_input(text);
    controller.settled().await;

    Ok(page.snapshot().suggestions)
}

async fn interactive(mut widget: Widget) -> anyhow::Result<()> {
    println!("Type a place to look up. `:theme` toggles the theme, an empty line quits.");

    loop {
        let text = match Text::new("Place:").prompt() {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };
        let text = text.trim().to_string();

        if text.is_empty() {
            break;
        }
        if text == ":theme" {
            let theme = widget.toggle_theme();
            println!("Theme: {theme} {}", theme.glyph());
            continue;
        }

        widget.input(&text);
        widget.suggestions_settled().await;
        let labels = widget.page().snapshot().suggestions;

        let run = if labels.is_empty() {
            widget.submit().await
        } else {
            let as_typed = format!("Search \"{text}\" as typed");
            let mut options = labels.clone();
            options.push(as_typed);

            let picked = match Select::new("Did you mean:", options).raw_prompt() {
                Ok(picked) => picked,
                Err(InquireError::OperationCanceled) => {
                    widget.click_outside();
                    continue;
                }
                Err(InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err.into()),
            };

            if picked.index < labels.len() {
                match widget.choose_suggestion(picked.index).await {
                    Some(run) => run,
                    None => continue,
                }
            } else {
                widget.click_outside();
                widget.submit().await
            }
        };

        run.settled().await;
        println!("{}\n", output::text(&widget.page().snapshot()));
    }

    Ok(())
}
