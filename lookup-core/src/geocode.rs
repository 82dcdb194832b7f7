//! Forward and reverse geocoding against a Nominatim-compatible endpoint.

use crate::{
    error::FetchError,
    http::HttpClient,
    model::{Coordinates, Place},
};

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: HttpClient,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Up to `limit` candidates for a free-text query.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, FetchError> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();

        self.http
            .get_json(
                &url,
                &[
                    ("q", query),
                    ("format", "json"),
                    ("addressdetails", "1"),
                    ("limit", limit.as_str()),
                ],
            )
            .await
    }

    pub async fn reverse(&self, at: Coordinates) -> Result<Place, FetchError> {
        let url = format!("{}/reverse", self.base_url);
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        self.http
            .get_json(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("format", "json"),
                    ("addressdetails", "1"),
                ],
            )
            .await
    }
}
