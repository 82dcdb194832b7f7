use std::sync::Arc;

use serde::Deserialize;

use crate::{cache::Cache, error::FetchError, http::HttpClient, model::CountryRecord};

const FIELDS: &str = "name,flags,capital,population";

/// REST Countries client keyed by two-letter country code.
#[derive(Debug, Clone)]
pub struct CountryClient {
    http: HttpClient,
    base_url: String,
    cache: Arc<Cache<CountryRecord>>,
}

impl CountryClient {
    pub fn new(
        http: HttpClient,
        base_url: impl Into<String>,
        cache: Arc<Cache<CountryRecord>>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Country metadata for `code`, served from the cache after the first fetch.
    pub async fn country(&self, code: &str) -> Result<CountryRecord, FetchError> {
        self.cache
            .get_or_fetch(code, || self.fetch(code))
            .await
    }

    async fn fetch(&self, code: &str) -> Result<CountryRecord, FetchError> {
        let url = format!("{}/alpha/{}", self.base_url, code);
        let body: RcBody = self.http.get_json(&url, &[("fields", FIELDS)]).await?;

        let country = match body {
            RcBody::Many(list) => list.into_iter().next().unwrap_or_default(),
            RcBody::One(c) => c,
        };

        Ok(country.into_record(code))
    }
}

/// `/alpha/{code}` answers with an object, older deployments with an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RcBody {
    Many(Vec<RcCountry>),
    One(RcCountry),
}

#[derive(Debug, Default, Deserialize)]
struct RcName {
    common: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RcFlags {
    svg: Option<String>,
    png: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RcCountry {
    #[serde(default)]
    name: Option<RcName>,
    #[serde(default)]
    flags: Option<RcFlags>,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    population: Option<u64>,
}

impl RcCountry {
    fn into_record(self, code: &str) -> CountryRecord {
        let flag_url = self
            .flags
            .and_then(|f| f.svg.filter(|s| !s.is_empty()).or(f.png))
            .filter(|s| !s.is_empty());

        CountryRecord {
            code: code.to_owned(),
            name: self.name.and_then(|n| n.common),
            flag_url,
            capital: self.capital.into_iter().next().filter(|c| !c.is_empty()),
            population: self.population,
        }
    }
}
