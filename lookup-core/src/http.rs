use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Nominatim rejects requests without an identifying agent.
pub const USER_AGENT: &str = concat!("country-lookup/", env!("CARGO_PKG_VERSION"));

/// Thin JSON GET helper shared by every upstream client.
///
/// No retries and no timeout: a request either resolves or the transport
/// error bubbles up as [`FetchError::Transport`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, FetchError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        tracing::debug!(url, "GET");

        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(url, %status, "upstream returned non-success status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn get_json_parses_body_and_sends_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/things"))
            .and(query_param("q", "a b"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "n": 3 })))
            .expect(1)
            .mount(&server)
            .await;

        let http = HttpClient::new().unwrap();
        let value: serde_json::Value = http
            .get_json(&format!("{}/things", server.uri()), &[("q", "a b")])
            .await
            .unwrap();

        assert_eq!(value["n"], 3);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let http = HttpClient::new().unwrap();
        let err = http
            .get_json::<serde_json::Value>(&server.uri(), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(404)));
        assert_eq!(err.to_string(), "Request failed (404)");
    }

    #[tokio::test]
    async fn garbage_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let http = HttpClient::new().unwrap();
        let err = http
            .get_json::<serde_json::Value>(&server.uri(), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }
}
