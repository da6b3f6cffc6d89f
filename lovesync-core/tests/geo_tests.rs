use std::time::Duration;

use lovesync_core::config::GeolocationConfig;
use lovesync_core::error::GeoError;
use lovesync_core::{map_url, Geolocator, HttpGeolocator, Locator, Position};
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn http_geolocator_reads_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "Paris",
            "latitude": 48.8566,
            "longitude": 2.3522
        })))
        .expect(1)
        .mount(&server)
        .await;

    let geo = HttpGeolocator::new(
        Client::new(),
        &format!("{}/json", server.uri()),
        Duration::from_secs(2),
    )
    .unwrap();
    let position = geo.current_position().await.unwrap();
    assert_eq!(position, Position { latitude: 48.8566, longitude: 2.3522 });
}

#[tokio::test]
async fn http_geolocator_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let geo = HttpGeolocator::new(
        Client::new(),
        &format!("{}/json", server.uri()),
        Duration::from_secs(2),
    )
    .unwrap();
    assert!(matches!(geo.current_position().await, Err(GeoError::Network(_))));
}

#[tokio::test]
async fn http_geolocator_rejects_out_of_range_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "latitude": 123.0, "longitude": 0.0 })),
        )
        .mount(&server)
        .await;

    let geo = HttpGeolocator::new(Client::new(), &server.uri(), Duration::from_secs(2)).unwrap();
    assert!(matches!(
        geo.current_position().await,
        Err(GeoError::OutOfRange { .. })
    ));
}

#[test]
fn invalid_endpoint_is_rejected() {
    let err = HttpGeolocator::new(Client::new(), "not a url", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, GeoError::InvalidEndpoint(_)));
}

#[tokio::test]
async fn config_without_endpoint_uses_fallback_coordinates() {
    let config = GeolocationConfig::default();
    let locator = config.build_locator(Client::new()).unwrap();
    assert!(matches!(locator, Locator::Fixed(_)));
    let position = locator.current_position().await.unwrap();
    assert_eq!(position.latitude, config.fallback_latitude);
    assert_eq!(position.longitude, config.fallback_longitude);
}

#[test]
fn map_url_points_at_the_position() {
    let url = map_url(Position { latitude: 40.7829, longitude: -73.9654 }).unwrap();
    assert_eq!(url.host_str(), Some("www.openstreetmap.org"));
    assert_eq!(url.fragment(), Some("map=16/40.7829/-73.9654"));
    assert!(url.query().unwrap().contains("mlat=40.7829"));
}
