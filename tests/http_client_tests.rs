//! Integration tests for the HTTP and REST client layers.
//!
//! These tests verify authentication, default headers, key switching,
//! response parsing, and status-to-error mapping against a mock server.

use std::time::Duration;

use easypost::clients::REQUEST_ID_HEADER;
use easypost::{
    ApiKey, BaseUrl, EasyPostConfig, HttpError, Pickup, ResourceError, RestClient, RestError,
    RestResource,
};
use serde_json::json;
use wiremock::matchers::{header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("EZTK-test-key:")
const TEST_KEY_AUTH: &str = "Basic RVpUSy10ZXN0LWtleTo=";
// base64("EZAK-production-key:")
const PRODUCTION_KEY_AUTH: &str = "Basic RVpBSy1wcm9kdWN0aW9uLWtleTo=";

fn config_for(base_url: &str) -> EasyPostConfig {
    EasyPostConfig::builder()
        .api_key(ApiKey::new("EZTK-test-key").unwrap())
        .base_url(BaseUrl::new(base_url).unwrap())
        .user_agent_prefix("shipping-tests/2.1")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

async fn run_blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

// ============================================================================
// Headers and Authentication
// ============================================================================

#[tokio::test]
async fn test_requests_carry_basic_auth_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_1"))
        .and(header("authorization", TEST_KEY_AUTH))
        .and(header("accept", "application/json"))
        .and(header_regex(
            "user-agent",
            r"^shipping-tests/2\.1 \| EasyPost Rust Client v\d+\.\d+\.\d+ \| Rust ",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "pickup_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let response = run_blocking(move || {
        let client = RestClient::new(&config_for(&base)).unwrap();
        client.get("pickups/pickup_1", None)
    })
    .await
    .unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.body["id"], "pickup_1");
}

#[tokio::test]
async fn test_with_api_key_switches_credentials_per_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_1"))
        .and(header("authorization", TEST_KEY_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "pickup_1", "mode": "test"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_1"))
        .and(header("authorization", PRODUCTION_KEY_AUTH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "pickup_1", "mode": "production"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let (test_pickup, production_pickup) = run_blocking(move || {
        let client = RestClient::new(&config_for(&base)).unwrap();
        let production = client.with_api_key(ApiKey::new("EZAK-production-key").unwrap());

        assert_eq!(client.api_key().as_ref(), "EZTK-test-key");
        assert_eq!(production.api_key().as_ref(), "EZAK-production-key");

        (
            Pickup::find(&client, "pickup_1").unwrap().into_inner(),
            Pickup::find(&production, "pickup_1").unwrap().into_inner(),
        )
    })
    .await;

    assert_eq!(test_pickup.mode.as_deref(), Some("test"));
    assert_eq!(production_pickup.mode.as_deref(), Some("production"));
}

#[tokio::test]
async fn test_path_ids_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup%2F..%2Fsecret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "pickup/../secret"})))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let pickup = run_blocking(move || {
        let client = RestClient::new(&config_for(&base)).unwrap();
        Pickup::find(&client, "pickup/../secret")
    })
    .await
    .unwrap();

    assert_eq!(pickup.id.as_deref(), Some("pickup/../secret"));
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_server_error_keeps_status_code_and_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_1/cancel"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_string("<html>Service Unavailable</html>")
                .insert_header(REQUEST_ID_HEADER, "req-503"),
        )
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let result = run_blocking(move || {
        let client = RestClient::new(&config_for(&base)).unwrap();
        client.post("pickups/pickup_1/cancel", None, None)
    })
    .await;

    match result {
        Err(RestError::Http(HttpError::Response(e))) => {
            assert_eq!(e.code, 503);
            assert_eq!(e.message, "<html>Service Unavailable</html>");
            assert_eq!(e.error_reference.as_deref(), Some("req-503"));
        }
        other => panic!("Expected HTTP 503 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_is_wrapped_http_error_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_1"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": "RATE_LIMITED", "message": "Too many requests"}
        })))
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let result = run_blocking(move || {
        let client = RestClient::new(&config_for(&base)).unwrap();
        Pickup::find(&client, "pickup_1")
    })
    .await;

    match result {
        Err(ResourceError::Http(HttpError::Response(e))) => {
            assert_eq!(e.code, 429);
            assert_eq!(e.error_code.as_deref(), Some("RATE_LIMITED"));
        }
        other => panic!("Expected wrapped 429, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let result = run_blocking(move || {
        let client = RestClient::new(&config_for(&base)).unwrap();
        Pickup::find(&client, "pickup_1")
    })
    .await;

    assert!(matches!(
        result,
        Err(ResourceError::InvalidResponse { resource: "Pickup", .. })
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/v2", listener.local_addr().unwrap());
    drop(listener);

    let result = run_blocking(move || {
        let client = RestClient::new(&config_for(&base)).unwrap();
        client.get("pickups/pickup_1", None)
    })
    .await;

    assert!(matches!(result, Err(RestError::Http(HttpError::Network(_)))));
}

#[test]
fn test_empty_path_is_rejected_before_sending() {
    let client = RestClient::new(&config_for("https://api.easypost.com/v2")).unwrap();
    let result = client.get("/", None);
    assert!(matches!(result, Err(RestError::InvalidPath { .. })));
}
