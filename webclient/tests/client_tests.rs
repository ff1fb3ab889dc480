//! Web client facade integration tests
//!
//! Drives the token cache, graceful degradation, retry bounds, circuit
//! breaker, and cancellation behavior against a mock API server.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_webclient::config::{ClientConfig, TransportSettings};
use skycast_webclient::{AuthenticationService, ClientError, Transport, WeatherApiClient};

fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        api_key: "web-app-api-key-1234567890".to_string(),
        client_id: "web-client".to_string(),
        transport: TransportSettings {
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            max_retries: 0,
            retry_initial_delay_ms: 1,
            retry_max_delay_ms: 5,
            circuit_failure_threshold: 100,
            circuit_reset_secs: 60,
        },
    }
}

fn build_stack(
    config: &ClientConfig,
) -> (Arc<AuthenticationService>, WeatherApiClient) {
    let transport = Arc::new(Transport::new(
        &config.transport.timeouts(),
        config.transport.retry(),
        config.transport.circuit_breaker(),
    ));
    let auth = Arc::new(AuthenticationService::new(config, transport.clone()));
    let weather = WeatherApiClient::new(config, transport, auth.clone());
    (auth, weather)
}

async fn mount_token_endpoint(server: &MockServer, token: &str, expires_in: i64, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": token,
            "expiresIn": expires_in,
            "tokenType": "Bearer",
        })))
        .expect(expected)
        .mount(server)
        .await;
}

fn forecast_entry(date: &str, temperature_c: i64, summary: &str) -> Value {
    json!({
        "date": date,
        "temperatureC": temperature_c,
        "summary": summary,
        "temperatureF": 32 + (temperature_c as f64 / 0.5556) as i64,
    })
}

#[tokio::test]
async fn test_first_token_call_exchanges_once_then_caches() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token-1", 3600, 1).await;

    let config = test_config(&server.uri());
    let (auth, _weather) = build_stack(&config);

    assert_eq!(auth.token().await.unwrap(), "token-1");
    // Second call within the refresh margin: served from cache, no exchange
    assert_eq!(auth.token().await.unwrap(), "token-1");
}

#[tokio::test]
async fn test_expired_token_triggers_exactly_one_more_exchange() {
    let server = MockServer::start().await;
    // expiresIn of zero makes every cached token immediately stale
    mount_token_endpoint(&server, "short-lived", 0, 2).await;

    let config = test_config(&server.uri());
    let (auth, _weather) = build_stack(&config);

    assert_eq!(auth.token().await.unwrap(), "short-lived");
    assert_eq!(auth.token().await.unwrap(), "short-lived");
}

#[tokio::test]
async fn test_failed_exchange_leaves_cache_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let (auth, _weather) = build_stack(&config);

    // Both calls fail and both hit the network: nothing was cached
    assert!(auth.token().await.is_none());
    assert!(auth.token().await.is_none());
}

#[tokio::test]
async fn test_forecast_fetch_attaches_bearer_token() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token-abc", 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/weatherforecast"))
        .and(header("authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            forecast_entry("2025-05-01", 20, "Mild"),
            forecast_entry("2025-05-02", 25, "Warm"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let (_auth, weather) = build_stack(&config);

    let forecasts = weather.get_forecasts(CancellationToken::new()).await.unwrap();

    assert_eq!(forecasts.len(), 2);
    assert_eq!(forecasts[0].temperature_c, 20);
    assert_eq!(forecasts[0].summary.as_deref(), Some("Mild"));
    assert_eq!(forecasts[1].date.to_string(), "2025-05-02");
}

#[tokio::test]
async fn test_forecast_degrades_to_empty_when_api_unavailable() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token-abc", 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/weatherforecast"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let (_auth, weather) = build_stack(&config);

    let forecasts = weather.get_forecasts(CancellationToken::new()).await.unwrap();
    assert!(forecasts.is_empty());
}

#[tokio::test]
async fn test_forecast_degrades_to_empty_on_malformed_payload() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token-abc", 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/weatherforecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ invalid json }"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let (_auth, weather) = build_stack(&config);

    let forecasts = weather.get_forecasts(CancellationToken::new()).await.unwrap();
    assert!(forecasts.is_empty());
}

#[tokio::test]
async fn test_unauthenticated_fetch_degrades_when_server_rejects() {
    let server = MockServer::start().await;
    // Token endpoint down: the request goes out without a bearer credential
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weatherforecast"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let (_auth, weather) = build_stack(&config);

    let forecasts = weather.get_forecasts(CancellationToken::new()).await.unwrap();
    assert!(forecasts.is_empty());
}

#[tokio::test]
async fn test_cancellation_is_resignaled_not_swallowed() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token-abc", 3600, 0).await;

    let config = test_config(&server.uri());
    let (_auth, weather) = build_stack(&config);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = weather.get_forecasts(cancel).await.unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token-abc", 3600, 1).await;

    // Initial try plus two retries, then give up and degrade
    Mock::given(method("GET"))
        .and(path("/weatherforecast"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.transport.max_retries = 2;
    let (_auth, weather) = build_stack(&config);

    let forecasts = weather.get_forecasts(CancellationToken::new()).await.unwrap();
    assert!(forecasts.is_empty());
}

#[tokio::test]
async fn test_circuit_opens_after_run_of_failures() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token-abc", 3600, 1).await;

    // Two failing fetches trip the breaker; the third never reaches the wire
    Mock::given(method("GET"))
        .and(path("/weatherforecast"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.transport.circuit_failure_threshold = 2;
    let (_auth, weather) = build_stack(&config);

    for _ in 0..3 {
        let forecasts = weather.get_forecasts(CancellationToken::new()).await.unwrap();
        assert!(forecasts.is_empty());
    }
}

#[tokio::test]
async fn test_result_is_truncated_to_max_items() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token-abc", 3600, 1).await;

    let entries: Vec<Value> = (1..=12)
        .map(|day| forecast_entry(&format!("2025-05-{:02}", day), 20, "Mild"))
        .collect();
    Mock::given(method("GET"))
        .and(path("/weatherforecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(entries)))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let (_auth, weather) = build_stack(&config);

    let forecasts = weather.get_forecasts(CancellationToken::new()).await.unwrap();
    assert_eq!(forecasts.len(), 10);
}
