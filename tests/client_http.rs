use httpmock::{Method::GET, MockServer};
use std::time::{Duration, Instant};

use openmeteo::{
    Client, ElevationParams, Endpoints, Error, ForecastParams, GeocodingParams, RateLimitRule,
};

fn client_for(server: &MockServer) -> Client {
    Client::with_endpoints(None, None, Endpoints::with_base(&server.base_url()))
        .expect("client should build")
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.41,
        "generationtime_ms": 2.2,
        "utc_offset_seconds": 3600,
        "timezone": "Europe/Berlin",
        "timezone_abbreviation": "CET",
        "elevation": 38.0,
        "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
        "hourly": {
            "time": ["2026-01-01T00:00", "2026-01-01T01:00"],
            "temperature_2m": [10.5, 9.8]
        }
    })
}

#[test]
fn forecast_success_decodes_fully() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/forecast")
            .query_param("latitude", "52.52")
            .query_param("longitude", "13.41")
            .query_param("hourly", "temperature_2m,rain");
        then.status(200).json_body(forecast_body());
    });

    let client = client_for(&server);
    let resp = client
        .forecast(&ForecastParams {
            latitude: 52.52,
            longitude: 13.41,
            hourly: Some(vec!["temperature_2m".to_string(), "rain".to_string()]),
            ..ForecastParams::default()
        })
        .expect("request should succeed");

    mock.assert();
    assert_eq!(resp.latitude, 52.52);
    assert_eq!(resp.timezone, "Europe/Berlin");
    assert_eq!(resp.utc_offset_seconds, 3600);

    let hourly = resp.hourly.expect("hourly block");
    assert_eq!(hourly["temperature_2m"].len(), 2);
    assert_eq!(
        hourly["temperature_2m"][0].as_ref().and_then(|s| s.as_f64()),
        Some(10.5)
    );
}

#[test]
fn http_400_carries_status_and_reason() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/forecast");
        then.status(400)
            .json_body(serde_json::json!({"error": true, "reason": "Invalid parameters"}));
    });

    let client = client_for(&server);
    let err = client
        .forecast(&ForecastParams::default())
        .expect_err("400 must fail");

    match err {
        Error::Http { status, reason } => {
            assert_eq!(status, 400);
            assert_eq!(reason, "Invalid parameters");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[test]
fn unparsable_success_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/forecast");
        then.status(200).body("definitely not json");
    });

    let client = client_for(&server);
    let err = client
        .forecast(&ForecastParams::default())
        .expect_err("malformed body must fail");
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn wrongly_typed_field_is_a_decode_error() {
    let server = MockServer::start();
    let mut body = forecast_body();
    body["latitude"] = serde_json::json!("fifty-two");
    server.mock(|when, then| {
        when.method(GET).path("/v1/forecast");
        then.status(200).json_body(body);
    });

    let client = client_for(&server);
    let err = client
        .forecast(&ForecastParams::default())
        .expect_err("type mismatch must fail");
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn non_json_error_body_falls_back_to_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/forecast");
        then.status(502).body("upstream exploded");
    });

    let client = client_for(&server);
    match client.forecast(&ForecastParams::default()) {
        Err(Error::Http { status, reason }) => {
            assert_eq!(status, 502);
            assert_eq!(reason, "upstream exploded");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[test]
fn empty_error_body_reports_unknown() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/forecast");
        then.status(404);
    });

    let client = client_for(&server);
    match client.forecast(&ForecastParams::default()) {
        Err(Error::Http { status, reason }) => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Unknown error");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[test]
fn unknown_top_level_fields_are_tolerated() {
    let server = MockServer::start();
    let mut body = forecast_body();
    body["added_next_year"] = serde_json::json!({"nested": [1, 2, 3]});
    server.mock(|when, then| {
        when.method(GET).path("/v1/forecast");
        then.status(200).json_body(body);
    });

    let client = client_for(&server);
    let resp = client
        .forecast(&ForecastParams::default())
        .expect("unknown fields must not break decoding");
    assert_eq!(resp.elevation, 38.0);
}

#[test]
fn elevation_sends_joined_coordinates() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/elevation")
            .query_param("latitude", "52.52,48.85")
            .query_param("longitude", "13.41,2.35");
        then.status(200)
            .json_body(serde_json::json!({"elevation": [38.0, 35.0]}));
    });

    let client = client_for(&server);
    let resp = client
        .elevation(&ElevationParams {
            latitude: vec![52.52, 48.85],
            longitude: vec![13.41, 2.35],
        })
        .expect("request should succeed");

    mock.assert();
    assert_eq!(resp.elevation, vec![38.0, 35.0]);
}

#[test]
fn geocoding_search_decodes_results() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/search")
            .query_param("name", "Berlin")
            .query_param("count", "1");
        then.status(200).json_body(serde_json::json!({
            "results": [{
                "id": 2950159,
                "name": "Berlin",
                "latitude": 52.52437,
                "longitude": 13.41053,
                "country_code": "DE",
                "timezone": "Europe/Berlin",
                "population": 3426354
            }],
            "generationtime_ms": 0.6
        }));
    });

    let client = client_for(&server);
    let resp = client
        .search_locations(&GeocodingParams {
            name: "Berlin".to_string(),
            count: Some(1),
            ..GeocodingParams::default()
        })
        .expect("request should succeed");

    let results = resp.results.expect("one match");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Berlin");
    assert_eq!(results[0].country_code.as_deref(), Some("DE"));
}

#[test]
fn rate_limit_spaces_out_sequential_requests() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/elevation");
        then.status(200)
            .json_body(serde_json::json!({"elevation": [0.0]}));
    });

    let rules = vec![RateLimitRule::new(1, Duration::from_millis(100))];
    let client = Client::with_endpoints(
        Some(rules),
        None,
        Endpoints::with_base(&server.base_url()),
    )
    .expect("client should build");

    let params = ElevationParams {
        latitude: vec![0.0],
        longitude: vec![0.0],
    };
    client.elevation(&params).expect("first request");
    let start = Instant::now();
    client.elevation(&params).expect("second request");
    assert!(start.elapsed() >= Duration::from_millis(90));
}
