//! Submit and geolocate sequences against a mock of all three upstream APIs.

mod common;

use common::*;
use lookup_core::{
    Coordinates, FixedLocation, NoLocation, UiState, WeatherPanel,
    lookup::{EMPTY_QUERY, GEO_UNAVAILABLE, GEO_UNSUPPORTED},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn repeated_query_fetches_country_and_weather_once() {
    let server = MockServer::start().await;
    mount_search(&server, "Lyon", serde_json::json!([nominatim_hit(None, "France", "fr")]), 2).await;
    mount_country(&server, "FR", country_body("France", Some("Paris"), 67_391_582), 1).await;
    mount_weather(&server, "Paris", 200, 1).await;

    let lookup = lookup(&server);

    for _ in 0..2 {
        lookup.page().update(|p| p.input = "  Lyon ".into());
        let run = lookup.submit().await;
        assert!(run.has_pending_weather());
        run.settled().await;

        let page = lookup.page().snapshot();
        let card = page.state.card().expect("card shown");
        assert_eq!(card.country.code, "FR");
        assert_eq!(card.country.name.as_deref(), Some("France"));
        match &card.weather {
            WeatherPanel::Ready { capital, report } => {
                assert_eq!(capital, "Paris");
                assert_eq!(report.temperature, Some(21.0));
            }
            other => panic!("unexpected weather panel: {other:?}"),
        }
    }

    assert_eq!(requests_to(&server, "/countries").await, 1);
    assert_eq!(requests_to(&server, "/weather").await, 1);
}

#[tokio::test]
async fn weather_failure_never_becomes_top_level_error() {
    let server = MockServer::start().await;
    mount_search(&server, "Oslo", serde_json::json!([nominatim_hit(None, "Norway", "no")]), 1).await;
    mount_country(&server, "NO", country_body("Norway", Some("Oslo"), 5_000_000), 1).await;
    mount_weather(&server, "Oslo", 500, 1).await;

    let lookup = lookup(&server);
    lookup.page().update(|p| p.input = "Oslo".into());
    lookup.submit().await.settled().await;

    let page = lookup.page().snapshot();
    assert_eq!(page.state.error(), None);
    assert_eq!(page.state.card().unwrap().weather, WeatherPanel::Unavailable);
    assert!(!page.state.is_loading());
}

#[tokio::test]
async fn card_renders_before_weather_arrives() {
    let server = MockServer::start().await;
    mount_search(&server, "Rome", serde_json::json!([nominatim_hit(None, "Italy", "it")]), 1).await;
    mount_country(&server, "IT", country_body("Italy", Some("Rome"), 59_000_000), 1).await;

    Mock::given(method("GET"))
        .and(path("/weather/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(300))
                .set_body_json(serde_json::json!({ "main": { "temp": 25.0 }, "weather": [] })),
        )
        .mount(&server)
        .await;

    let lookup = lookup(&server);
    lookup.page().update(|p| p.input = "Rome".into());
    let run = lookup.submit().await;

    let page = lookup.page().snapshot();
    assert!(!page.state.is_loading());
    assert_eq!(page.state.card().unwrap().weather, WeatherPanel::Fetching);

    run.settled().await;
    assert!(matches!(
        lookup.page().snapshot().state.card().unwrap().weather,
        WeatherPanel::Ready { .. }
    ));
}

#[tokio::test]
async fn blank_query_is_rejected_without_network() {
    let server = MockServer::start().await;
    let lookup = lookup(&server);
    lookup.page().update(|p| {
        p.input = "   ".into();
        p.suggestions = vec!["stale".into()];
    });

    let run = lookup.submit().await;

    assert!(!run.has_pending_weather());
    let page = lookup.page().snapshot();
    assert_eq!(page.state, UiState::Error(EMPTY_QUERY.to_string()));
    assert!(!page.suggestions_visible());
    assert_eq!(requests_to(&server, "/").await, 0);
}

#[tokio::test]
async fn zero_hits_is_not_found() {
    let server = MockServer::start().await;
    mount_search(&server, "Atlantis", serde_json::json!([]), 1).await;

    let lookup = lookup(&server);
    lookup.page().update(|p| p.input = "Atlantis".into());
    let run = lookup.submit().await;

    assert!(!run.has_pending_weather());
    let page = lookup.page().snapshot();
    assert_eq!(page.state.error(), Some("❌ Could not find \"Atlantis\"."));
    assert!(!page.state.is_loading());
    assert_eq!(requests_to(&server, "/countries").await, 0);
    assert_eq!(requests_to(&server, "/weather").await, 0);
}

#[tokio::test]
async fn upstream_failure_is_surfaced_with_status() {
    let server = MockServer::start().await;
    mount_search(&server, "Berlin", serde_json::json!([nominatim_hit(None, "Germany", "de")]), 1).await;

    Mock::given(method("GET"))
        .and(path("/countries/alpha/DE"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let lookup = lookup(&server);
    lookup.page().update(|p| p.input = "Berlin".into());
    lookup.submit().await;

    let page = lookup.page().snapshot();
    assert_eq!(page.state.error(), Some("❌ Error: Request failed (502)"));
    assert!(!page.state.is_loading());
}

#[tokio::test]
async fn hit_without_country_code_is_an_error() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Open sea",
        serde_json::json!([{ "display_name": "Open sea", "address": {} }]),
        1,
    )
    .await;

    let lookup = lookup(&server);
    lookup.page().update(|p| p.input = "Open sea".into());
    lookup.submit().await;

    assert_eq!(
        lookup.page().snapshot().state.error(),
        Some("❌ Error: Location has no country code")
    );
}

#[tokio::test]
async fn geolocation_without_capital_skips_weather() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/reverse"))
        .and(query_param("lat", "-75.25"))
        .and(query_param("lon", "-0.07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": { "country": "Antarctica", "country_code": "aq" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_country(&server, "AQ", country_body("Antarctica", None, 1000), 1).await;

    let lookup = lookup(&server);
    let run = lookup
        .locate(&FixedLocation(Coordinates { latitude: -75.25, longitude: -0.07 }))
        .await;

    assert!(!run.has_pending_weather());
    let page = lookup.page().snapshot();
    let card = page.state.card().unwrap();
    assert_eq!(card.country.name.as_deref(), Some("Antarctica"));
    assert_eq!(card.weather, WeatherPanel::Unavailable);
    assert_eq!(requests_to(&server, "/weather").await, 0);
}

#[tokio::test]
async fn geolocation_unsupported_is_detected_up_front() {
    let server = MockServer::start().await;
    let lookup = lookup(&server);

    lookup.locate(&NoLocation).await;

    assert_eq!(lookup.page().snapshot().state.error(), Some(GEO_UNSUPPORTED));
    assert_eq!(requests_to(&server, "/").await, 0);
}

#[derive(Debug)]
struct DeniedLocation;

#[async_trait::async_trait]
impl lookup_core::LocationProvider for DeniedLocation {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, lookup_core::LocationError> {
        Err(lookup_core::LocationError::Unavailable("permission denied".into()))
    }
}

#[tokio::test]
async fn geolocation_failure_has_its_own_message() {
    let server = MockServer::start().await;
    let lookup = lookup(&server);

    lookup.locate(&DeniedLocation).await;

    let page = lookup.page().snapshot();
    assert_eq!(page.state.error(), Some(GEO_UNAVAILABLE));
    assert!(!page.state.is_loading());
}

#[tokio::test]
async fn reverse_geocode_failure_is_prefixed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let lookup = lookup(&server);
    lookup
        .locate(&FixedLocation(Coordinates { latitude: 0.0, longitude: 0.0 }))
        .await;

    assert_eq!(
        lookup.page().snapshot().state.error(),
        Some("❌ Error fetching location: Request failed (503)")
    );
}
