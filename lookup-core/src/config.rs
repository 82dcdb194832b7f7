use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Environment variable that overrides the stored OpenWeather key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Base URLs of the three upstream APIs plus the weather icon host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding: String,
    pub countries: String,
    pub weather: String,
    pub icons: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: "https://nominatim.openstreetmap.org".to_string(),
            countries: "https://restcountries.com/v3.1".to_string(),
            weather: "https://api.openweathermap.org/data/2.5".to_string(),
            icons: "https://openweathermap.org/img/wn".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every API at one base URL, e.g. a local mock server.
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            geocoding: format!("{base}/geocoding"),
            countries: format!("{base}/countries"),
            weather: format!("{base}/weather"),
            icons: format!("{base}/icons"),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// weather_api_key = "..."
/// debounce_ms = 300
///
/// [endpoints]
/// geocoding = "https://nominatim.openstreetmap.org"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub weather_api_key: Option<String>,
    pub endpoints: Endpoints,
    pub debounce_ms: u64,
    pub suggestion_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            endpoints: Endpoints::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl Config {
    /// OpenWeather key, preferring the environment over the stored value.
    pub fn weather_api_key(&self) -> Result<String> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        self.resolve_api_key(from_env)
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.weather_api_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `lookup configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_weather_api_key(&mut self, api_key: String) {
        self.weather_api_key = Some(api_key);
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "country-lookup", "lookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
