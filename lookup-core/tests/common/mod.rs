#![allow(dead_code)]

use std::time::Duration;

use lookup_core::{Endpoints, Lookup, Page, PageHandle, SuggestionController, Widget};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_DEBOUNCE: Duration = Duration::from_millis(50);

pub fn lookup(server: &MockServer) -> Lookup {
    Lookup::new(
        &Endpoints::rooted_at(&server.uri()),
        "TEST_KEY".to_string(),
        PageHandle::new(Page::default()),
    )
    .unwrap()
}

pub fn widget(server: &MockServer) -> Widget {
    let lookup = lookup(server);
    let suggestions = SuggestionController::new(lookup.geocoder().clone(), lookup.page().clone())
        .with_delay(TEST_DEBOUNCE);
    Widget::new(lookup, suggestions)
}

pub fn nominatim_hit(state: Option<&str>, country: &str, code: &str) -> serde_json::Value {
    let mut address = serde_json::json!({ "country": country, "country_code": code });
    if let Some(state) = state {
        address["state"] = serde_json::json!(state);
    }
    serde_json::json!({ "display_name": country, "address": address })
}

pub fn country_body(name: &str, capital: Option<&str>, population: u64) -> serde_json::Value {
    serde_json::json!({
        "name": { "common": name },
        "flags": { "svg": format!("https://flags/{name}.svg") },
        "capital": capital.map(|c| vec![c]).unwrap_or_default(),
        "population": population
    })
}

pub async fn mount_search(server: &MockServer, query: &str, hits: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/geocoding/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_country(server: &MockServer, code: &str, body: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/countries/alpha/{code}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_weather(server: &MockServer, city: &str, status: u16, times: u64) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": { "temp": 21.0 },
            "weather": [{ "description": "clear sky", "icon": "01d" }]
        }))
    } else {
        ResponseTemplate::new(status)
    };

    Mock::given(method("GET"))
        .and(path("/weather/weather"))
        .and(query_param("q", city))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(template)
        .expect(times)
        .mount(server)
        .await;
}

pub async fn requests_to(server: &MockServer, prefix: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().starts_with(prefix))
        .count()
}
