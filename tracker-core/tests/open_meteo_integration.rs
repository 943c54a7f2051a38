//! Integration tests for OpenMeteoProvider using wiremock.

use chrono::{TimeZone, Utc};
use tracker_core::provider::open_meteo::OpenMeteoProvider;
use tracker_core::{IngestRequest, MemoryObservationStore, Tracker, TrackerError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenMeteoProvider {
    OpenMeteoProvider::new(
        format!("{}/v1/search", server.uri()),
        format!("{}/v1/forecast", server.uri()),
    )
}

async fn mount_paris_geocode(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {
                    "id": 2988507,
                    "name": "Paris",
                    "latitude": 48.8566,
                    "longitude": 2.3522,
                    "country": "France"
                }
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_paris_forecast(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.8566"))
        .and(query_param("longitude", "2.3522"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_current_conditions_success() {
    let server = MockServer::start().await;
    mount_paris_geocode(&server).await;
    mount_paris_forecast(
        &server,
        serde_json::json!({
            "latitude": 48.86,
            "longitude": 2.35,
            "current_weather": {
                "temperature": 15.0,
                "windspeed": 10.0,
                "winddirection": 200,
                "time": "2024-01-01T12:00:00Z"
            }
        }),
    )
    .await;

    let conditions = provider_for(&server)
        .current_conditions(&IngestRequest::new("Paris", "France"))
        .await
        .unwrap();

    assert_eq!(conditions.latitude, 48.8566);
    assert_eq!(conditions.longitude, 2.3522);
    assert_eq!(conditions.temperature_c, 15.0);
    assert_eq!(conditions.windspeed_kmh, 10.0);
    assert_eq!(conditions.observation_time, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
}

#[tokio::test]
async fn test_missing_results_is_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.4
        })))
        .mount(&server)
        .await;

    // The forecast endpoint must not be called at all.
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .current_conditions(&IngestRequest::new("Atlantis", "Ocean"))
        .await
        .unwrap_err();

    assert!(matches!(err, TrackerError::CityNotFound(ref c) if c == "Atlantis"), "got {err}");
}

#[tokio::test]
async fn test_empty_results_is_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .current_conditions(&IngestRequest::new("Nowhere", "None"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_missing_current_weather_is_malformed() {
    let server = MockServer::start().await;
    mount_paris_geocode(&server).await;
    mount_paris_forecast(&server, serde_json::json!({ "latitude": 48.86 })).await;

    let err = provider_for(&server)
        .current_conditions(&IngestRequest::new("Paris", "France"))
        .await
        .unwrap_err();

    assert!(matches!(err, TrackerError::MalformedResponse(_)), "got {err}");
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_upstream_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .current_conditions(&IngestRequest::new("Paris", "France"))
        .await
        .unwrap_err();

    match err {
        TrackerError::Upstream { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "service unavailable");
        }
        other => panic!("expected Upstream error, got {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    // Nothing listens on the discard port.
    let provider =
        OpenMeteoProvider::new("http://127.0.0.1:9/v1/search", "http://127.0.0.1:9/v1/forecast");

    let err =
        provider.current_conditions(&IngestRequest::new("Paris", "France")).await.unwrap_err();

    assert!(matches!(err, TrackerError::Transport(_)), "got {err}");
}

#[tokio::test]
async fn test_tracker_add_through_open_meteo() {
    let server = MockServer::start().await;
    mount_paris_geocode(&server).await;
    mount_paris_forecast(
        &server,
        serde_json::json!({
            "current_weather": {
                "temperature": 15.0,
                "windspeed": 10.0,
                "time": "2024-01-01T12:00:00Z"
            }
        }),
    )
    .await;

    let mut tracker = Tracker::new(MemoryObservationStore::new(), Box::new(provider_for(&server)));
    let obs = tracker.add(&IngestRequest::new("Paris", "France")).await.unwrap();

    assert_eq!(obs.id, 1);
    assert_eq!(
        obs.to_string(),
        "[1] Paris, France | 15.0°C, 10.0 km/h | 2024-01-01 12:00:00 | Notes: No notes"
    );
}
