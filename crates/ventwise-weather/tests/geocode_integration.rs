//! Integration tests for Geocoder and location resolution using wiremock.

use ventwise_core::{GeocodingConfig, LocationConfig};
use ventwise_weather::{
    resolve_location, Geocoder, Location, LocationError, LocationQuery, WeatherError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder_for(server: &MockServer) -> Geocoder {
    let config = GeocodingConfig {
        search_url: format!("{}/search", server.uri()),
        reverse_url: format!("{}/reverse", server.uri()),
        user_agent: "Ventwise-Test/1.0".to_string(),
        result_limit: 3,
    };
    Geocoder::new(&config).unwrap()
}

fn search_hits() -> serde_json::Value {
    serde_json::json!([
        {
            "lat": "52.5170365",
            "lon": "13.3888599",
            "display_name": "Berlin, Deutschland",
            "address": { "city": "Berlin", "country": "Deutschland" }
        },
        {
            "lat": "39.9845",
            "lon": "-75.0191",
            "display_name": "Berlin, Camden County, New Jersey, United States",
            "address": { "town": "Berlin", "state": "New Jersey", "country": "United States" }
        },
        {
            "lat": "not-a-number",
            "lon": "0",
            "display_name": "Broken"
        }
    ])
}

#[tokio::test]
async fn test_search_returns_named_matches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Berlin"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "3"))
        .and(header("user-agent", "Ventwise-Test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hits()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cities = geocoder_for(&mock_server).search("  Berlin ").await;

    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0].name, "Berlin, Deutschland");
    assert_eq!(cities[1].name, "Berlin, New Jersey");
    assert!((cities[0].latitude - 52.517).abs() < 0.001);
}

#[tokio::test]
async fn test_search_failures_return_no_matches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Oslo"))
        .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Bergen"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let geocoder = geocoder_for(&mock_server);
    assert!(geocoder.search("Oslo").await.is_empty());
    assert!(geocoder.search("Bergen").await.is_empty());
}

#[tokio::test]
async fn test_resolve_city_during_outage_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = resolve_location(
        &LocationQuery::City("Oslo".to_string()),
        &LocationConfig::default(),
        &geocoder_for(&mock_server),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        WeatherError::Location(LocationError::NotFound(ref name)) if name == "Oslo"
    ));
}

#[tokio::test]
async fn test_reverse_builds_place_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "Seattle, King County, Washington, United States",
            "address": { "city": "Seattle", "state": "Washington", "country": "United States" }
        })))
        .mount(&mock_server)
        .await;

    let loc = Location::new(47.6062, -122.3321).unwrap();
    let name = geocoder_for(&mock_server).reverse(&loc).await;
    assert_eq!(name.as_deref(), Some("Seattle, Washington"));
}

#[tokio::test]
async fn test_reverse_failure_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let loc = Location::new(0.0, 0.0).unwrap();
    assert!(geocoder_for(&mock_server).reverse(&loc).await.is_none());
}

#[tokio::test]
async fn test_resolve_city_uses_best_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hits()))
        .mount(&mock_server)
        .await;

    let loc = resolve_location(
        &LocationQuery::City("Berlin".to_string()),
        &LocationConfig::default(),
        &geocoder_for(&mock_server),
    )
    .await
    .unwrap();

    assert_eq!(loc.city_name.as_deref(), Some("Berlin, Deutschland"));
}

#[tokio::test]
async fn test_resolve_unknown_city_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let err = resolve_location(
        &LocationQuery::City("Atlantis".to_string()),
        &LocationConfig::default(),
        &geocoder_for(&mock_server),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        WeatherError::Location(LocationError::NotFound(ref name)) if name == "Atlantis"
    ));
}

#[tokio::test]
async fn test_resolve_coordinates_attaches_place_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": { "town": "Tromsø", "country": "Norge" }
        })))
        .mount(&mock_server)
        .await;

    let loc = resolve_location(
        &LocationQuery::Coordinates {
            latitude: 69.65,
            longitude: 18.96,
        },
        &LocationConfig::default(),
        &geocoder_for(&mock_server),
    )
    .await
    .unwrap();

    assert_eq!(loc.label(), "Tromsø, Norge");
}
