use std::sync::Arc;

use serde::Deserialize;

use crate::{cache::Cache, error::FetchError, http::HttpClient, model::WeatherRecord};

/// OpenWeather current-conditions client keyed by city name.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    http: HttpClient,
    base_url: String,
    cache: Arc<Cache<WeatherRecord>>,
}

impl WeatherClient {
    pub fn new(
        http: HttpClient,
        base_url: impl Into<String>,
        api_key: String,
        cache: Arc<Cache<WeatherRecord>>,
    ) -> Self {
        Self {
            api_key,
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Current weather for `city`, or `None` when the upstream call fails.
    pub async fn current(&self, city: &str) -> Option<WeatherRecord> {
        match self.cache.get_or_fetch(city, || self.fetch(city)).await {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(city, error = %err, "weather lookup failed");
                None
            }
        }
    }

    async fn fetch(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let url = format!("{}/weather", self.base_url);

        let parsed: OwCurrentResponse = self
            .http
            .get_json(
                &url,
                &[
                    ("q", city),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        let first = parsed.weather.into_iter().next();

        Ok(WeatherRecord {
            temperature: parsed.main.and_then(|m| m.temp),
            description: first.as_ref().and_then(|w| w.description.clone()),
            icon: first.and_then(|w| w.icon).filter(|i| !i.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}
