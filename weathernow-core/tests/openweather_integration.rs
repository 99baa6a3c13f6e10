//! Integration tests for OpenWeatherProvider using wiremock.

use weathernow_core::{
    Coordinates, OpenWeatherProvider, TemperatureUnit, WeatherError, WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn london_weather() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1278, "lat": 51.5074},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "base": "stations",
        "main": {
            "temp": 9.4, "feels_like": 7.1, "temp_min": 8.0, "temp_max": 10.6,
            "pressure": 1021, "humidity": 76, "sea_level": 1021, "grnd_level": 1017
        },
        "visibility": 10000,
        "wind": {"speed": 4.12, "deg": 250, "gust": 7.2},
        "clouds": {"all": 75},
        "dt": 1640000000,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1639987485, "sunset": 1640015642},
        "timezone": 0,
        "id": 2643743,
        "name": "London",
        "cod": 200
    })
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), &server.uri()).unwrap()
}

#[tokio::test]
async fn test_geocode_sends_escaped_query_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "São Paulo, BR"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "São Paulo", "lat": -23.5505, "lon": -46.6333, "country": "BR", "state": "São Paulo"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = provider(&server).geocode("São Paulo, BR").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "São Paulo");
    assert_eq!(results[0].state.as_deref(), Some("São Paulo"));
    assert_eq!(results[0].coordinates(), Coordinates::new(-23.5505, -46.6333));
}

#[tokio::test]
async fn test_geocode_empty_list_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let results = provider(&server).geocode("Nowhereville").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_weather_sends_coordinates_and_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5074"))
        .and(query_param("lon", "-0.1278"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_weather()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = provider(&server)
        .fetch_current_weather(Coordinates::new(51.5074, -0.1278), TemperatureUnit::Imperial)
        .await
        .unwrap();

    assert_eq!(snapshot.name, "London");
    assert_eq!(snapshot.sys.country, "GB");
    assert_eq!(snapshot.visibility, Some(10000.0));
    assert_eq!(snapshot.wind.gust, Some(7.2));
    assert_eq!(snapshot.main.grnd_level, Some(1017.0));
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_current_weather(Coordinates::new(0.0, 0.0), TemperatureUnit::Metric)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    match err {
        WeatherError::Network { body, .. } => assert!(body.contains("Invalid API key")),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).geocode("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_missing_required_fields_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "London"
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_current_weather(Coordinates::new(51.5074, -0.1278), TemperatureUnit::Metric)
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Decode(_)), "{err:?}");
}
