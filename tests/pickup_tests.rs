//! Integration tests for the Pickup resource.
//!
//! These tests run each operation against a local mock of the EasyPost API
//! and verify paths, bodies, decoding, merge behavior, and error mapping.
//!
//! The client is blocking, so it is built, used, and dropped inside
//! `spawn_blocking` while the mock server runs on the test runtime.

use chrono::{TimeZone, Utc};
use easypost::rest::resources::{Address, CarrierAccount, ObjectRef, PickupCreateParams};
use easypost::{
    ApiKey, BaseUrl, EasyPostConfig, HttpError, ListParams, Pickup, PickupStatus, ResourceError,
    RestClient, RestError, RestResource,
};
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "EZTK-test-key";
// base64("EZTK-test-key:")
const BASIC_AUTH: &str = "Basic RVpUSy10ZXN0LWtleTo=";

fn client_for(base_url: &str) -> RestClient {
    let config = EasyPostConfig::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .base_url(BaseUrl::new(base_url).unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

async fn run_blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

fn pickup_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "object": "Pickup",
        "mode": "test",
        "status": status,
        "reference": "my-first-pickup",
        "min_datetime": "2024-05-01T10:00:00Z",
        "max_datetime": "2024-05-01T16:00:00Z",
        "is_account_address": false,
        "instructions": null,
        "messages": [],
        "confirmation": null,
        "address": {"id": "adr_1", "street1": "417 Montgomery St", "city": "San Francisco"},
        "carrier_accounts": [{"id": "ca_1", "type": "UpsAccount"}],
        "pickup_rates": [
            {"id": "rate_1", "object": "PickupRate", "carrier": "UPS", "service": "Same-day Pickup", "rate": "4.00", "pickup_id": id},
            {"id": "rate_2", "object": "PickupRate", "carrier": "UPS", "service": "Future-day Pickup", "rate": "2.50", "pickup_id": id}
        ],
        "created_at": "2024-04-30T09:00:00Z",
        "updated_at": "2024-04-30T09:00:00Z"
    })
}

fn scheduled_pickup() -> Pickup {
    let mut body = pickup_json("pickup_abc", "scheduled");
    body["confirmation"] = json!("WTC123456");
    serde_json::from_value(body).unwrap()
}

fn create_params() -> PickupCreateParams {
    PickupCreateParams {
        reference: Some("my-first-pickup".to_string()),
        min_datetime: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
        max_datetime: Some(Utc.with_ymd_and_hms(2024, 5, 1, 16, 0, 0).unwrap()),
        is_account_address: Some(false),
        instructions: Some("Special pickup instructions".to_string()),
        address: Some(Address {
            street1: Some("417 Montgomery St".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            zip: Some("94104".to_string()),
            country: Some("US".to_string()),
            ..Default::default()
        }),
        shipment: Some(ObjectRef::new("shp_1")),
        ..Default::default()
    }
}

// ============================================================================
// Retrieve
// ============================================================================

#[tokio::test]
async fn test_find_returns_pickup_with_matching_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_abc"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(pickup_json("pickup_abc", "unknown"))
                .insert_header("x-ep-request-uuid", "req-find-1"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let response = run_blocking(move || Pickup::find(&client_for(&base), "pickup_abc"))
        .await
        .unwrap();

    assert_eq!(response.id.as_deref(), Some("pickup_abc"));
    assert_eq!(response.status, Some(PickupStatus::Unknown));
    assert_eq!(response.request_id(), Some("req-find-1"));
    assert_eq!(
        response.address.as_ref().and_then(|a| a.id.as_deref()),
        Some("adr_1")
    );
}

#[tokio::test]
async fn test_find_with_blank_id_never_reaches_list_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pickups": [pickup_json("pickup_x", "scheduled")],
            "has_more": false
        })))
        .expect(0)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let (empty, spaces) = run_blocking(move || {
        let client = client_for(&base);
        (Pickup::find(&client, ""), Pickup::find(&client, "  "))
    })
    .await;

    for result in [empty, spaces] {
        assert!(matches!(
            result,
            Err(ResourceError::MissingId {
                resource: "Pickup",
                operation: "find"
            })
        ));
    }
}

#[tokio::test]
async fn test_instance_actions_reject_blank_id() {
    let server = MockServer::start().await;
    let base = format!("{}/v2", server.uri());

    let (buy, cancel, pickup) = run_blocking(move || {
        let client = client_for(&base);
        let mut pickup: Pickup = serde_json::from_value(pickup_json("", "scheduled")).unwrap();
        let buy = pickup.buy(&client, "UPS", "Same-day Pickup");
        let cancel = pickup.cancel(&client);
        (buy, cancel, pickup)
    })
    .await;

    assert!(matches!(buy, Err(ResourceError::MissingId { operation: "buy", .. })));
    assert!(matches!(cancel, Err(ResourceError::MissingId { operation: "cancel", .. })));
    assert_eq!(pickup.status, Some(PickupStatus::Scheduled));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_missing_pickup_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "NOT_FOUND", "message": "The requested resource could not be found.", "errors": []}
        })))
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let result = run_blocking(move || Pickup::find(&client_for(&base), "pickup_missing")).await;

    assert!(matches!(
        result,
        Err(ResourceError::NotFound { resource: "Pickup", ref id }) if id == "pickup_missing"
    ));
}

#[tokio::test]
async fn test_find_with_rejected_key_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_abc"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({
                    "error": {"code": "APIKEY.INACTIVE", "message": "This api key is no longer active.", "errors": []}
                }))
                .insert_header("x-ep-request-uuid", "req-401"),
        )
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let result = run_blocking(move || Pickup::find(&client_for(&base), "pickup_abc")).await;

    match result {
        Err(ResourceError::Unauthorized {
            message,
            request_id,
        }) => {
            assert!(message.contains("no longer active"));
            assert_eq!(request_id.as_deref(), Some("req-401"));
        }
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_sends_wrapped_params_and_returns_rates() {
    let server = MockServer::start().await;
    let expected_body = json!({
        "pickup": {
            "is_account_address": false,
            "min_datetime": "2024-05-01T10:00:00Z",
            "max_datetime": "2024-05-01T16:00:00Z",
            "reference": "my-first-pickup",
            "instructions": "Special pickup instructions",
            "address": {
                "street1": "417 Montgomery St",
                "city": "San Francisco",
                "state": "CA",
                "zip": "94104",
                "country": "US"
            },
            "shipment": {"id": "shp_1"}
        }
    });
    Mock::given(method("POST"))
        .and(path("/v2/pickups"))
        .and(header("content-type", "application/json"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(pickup_json("pickup_new", "unknown")))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let pickup = run_blocking(move || Pickup::create(&client_for(&base), &create_params()))
        .await
        .unwrap()
        .into_inner();

    assert!(pickup.id.as_deref().unwrap().starts_with("pickup_"));
    assert_eq!(pickup.pickup_rates.as_ref().map(Vec::len), Some(2));
    assert!(pickup.min_datetime <= pickup.max_datetime);
}

#[tokio::test]
async fn test_create_validation_error_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pickups"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": {
                "code": "PICKUP.INVALID",
                "message": "Invalid pickup",
                "errors": [
                    {"field": "min_datetime", "message": "must be before max_datetime"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let result = run_blocking(move || Pickup::create(&client_for(&base), &create_params())).await;

    match result {
        Err(ResourceError::ValidationFailed { errors, .. }) => {
            assert_eq!(
                errors.get("min_datetime"),
                Some(&vec!["must be before max_datetime".to_string()])
            );
        }
        other => panic!("Expected ValidationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_instance_create_with_existing_id_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pickups"))
        .respond_with(ResponseTemplate::new(201).set_body_json(pickup_json("pickup_new", "unknown")))
        .expect(0)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let (result, pickup) = run_blocking(move || {
        let mut pickup = Pickup {
            id: Some("pickup_existing".to_string()),
            reference: Some("local".to_string()),
            ..Default::default()
        };
        let result = pickup.create_in_place(&client_for(&base));
        (result, pickup)
    })
    .await;

    assert!(matches!(
        result,
        Err(ResourceError::ResourceAlreadyCreated { resource: "Pickup", ref id }) if id == "pickup_existing"
    ));
    assert_eq!(pickup.reference.as_deref(), Some("local"));
}

#[tokio::test]
async fn test_instance_create_replaces_every_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pickups"))
        .and(body_json(json!({
            "pickup": {
                "reference": "local-ref",
                "instructions": "Leave at the front desk",
                "carrier_accounts": [{"id": "ca_1"}]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(pickup_json("pickup_new", "unknown")))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let pickup = run_blocking(move || {
        let mut pickup = Pickup {
            reference: Some("local-ref".to_string()),
            instructions: Some("Leave at the front desk".to_string()),
            carrier_accounts: Some(vec![CarrierAccount {
                id: Some("ca_1".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        pickup.create_in_place(&client_for(&base)).unwrap();
        pickup
    })
    .await;

    assert_eq!(pickup.id.as_deref(), Some("pickup_new"));
    assert_eq!(pickup.reference.as_deref(), Some("my-first-pickup"));
    // The response has `instructions: null`, so the local value is gone.
    assert!(pickup.instructions.is_none());
    assert_eq!(pickup.mode.as_deref(), Some("test"));
    assert_eq!(pickup.pickup_rates.as_ref().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_created_pickup_matches_later_retrieve() {
    let server = MockServer::start().await;
    let created_body = pickup_json("pickup_rt", "unknown");
    let mut retrieved_body = created_body.clone();
    retrieved_body["updated_at"] = json!("2024-04-30T09:05:00Z");

    Mock::given(method("POST"))
        .and(path("/v2/pickups"))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_body))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_rt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(retrieved_body))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let (mut created, mut retrieved) = run_blocking(move || {
        let client = client_for(&base);
        let created = Pickup::create(&client, &create_params()).unwrap().into_inner();
        let id = created.id.clone().unwrap();
        let retrieved = Pickup::find(&client, &id).unwrap().into_inner();
        (created, retrieved)
    })
    .await;

    assert_eq!(retrieved.id, created.id);
    assert_ne!(retrieved.updated_at, created.updated_at);

    created.updated_at = None;
    retrieved.updated_at = None;
    assert_eq!(created, retrieved);
}

// ============================================================================
// Buy / Cancel
// ============================================================================

#[tokio::test]
async fn test_buy_schedules_pickup_with_confirmation() {
    let server = MockServer::start().await;
    let mut bought = pickup_json("pickup_abc", "scheduled");
    bought["confirmation"] = json!("WTC123456");

    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_abc/buy"))
        .and(body_json(json!({"carrier": "UPS", "service": "Same-day Pickup"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(bought))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let pickup = run_blocking(move || {
        let mut pickup: Pickup =
            serde_json::from_value(pickup_json("pickup_abc", "unknown")).unwrap();
        let rate = pickup.lowest_rate(&["UPS"], &["Same-day Pickup"]).unwrap().clone();
        pickup
            .buy(
                &client_for(&base),
                rate.carrier.as_deref().unwrap(),
                rate.service.as_deref().unwrap(),
            )
            .unwrap();
        pickup
    })
    .await;

    assert_eq!(pickup.status, Some(PickupStatus::Scheduled));
    assert_eq!(pickup.confirmation.as_deref(), Some("WTC123456"));
}

#[tokio::test]
async fn test_buy_failure_leaves_pickup_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_abc/buy"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": "INTERNAL_SERVER_ERROR", "message": "Something went wrong"}
        })))
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let (result, pickup) = run_blocking(move || {
        let mut pickup: Pickup =
            serde_json::from_value(pickup_json("pickup_abc", "unknown")).unwrap();
        let result = pickup.buy(&client_for(&base), "UPS", "Same-day Pickup");
        (result, pickup)
    })
    .await;

    assert!(matches!(result, Err(ResourceError::Http(_))));
    let original: Pickup = serde_json::from_value(pickup_json("pickup_abc", "unknown")).unwrap();
    assert_eq!(pickup, original);
}

#[tokio::test]
async fn test_cancel_sends_no_body_and_marks_canceled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_abc/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pickup_json("pickup_abc", "canceled")))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let pickup = run_blocking(move || {
        let mut pickup: Pickup =
            serde_json::from_value(pickup_json("pickup_abc", "scheduled")).unwrap();
        pickup.cancel(&client_for(&base)).unwrap();
        pickup
    })
    .await;

    assert_eq!(pickup.status, Some(PickupStatus::Canceled));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_cancel_failure_leaves_pickup_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_abc/cancel"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": {
                "code": "PICKUP.UNABLE_TO_CANCEL",
                "message": "Pickup has already been collected",
                "errors": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let (result, pickup) = run_blocking(move || {
        let mut pickup = scheduled_pickup();
        let result = pickup.cancel(&client_for(&base));
        (result, pickup)
    })
    .await;

    assert!(matches!(result, Err(ResourceError::ValidationFailed { .. })));
    assert_eq!(pickup, scheduled_pickup());
}

#[tokio::test]
async fn test_cancel_with_empty_success_body_leaves_pickup_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_abc/cancel"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let (result, pickup) = run_blocking(move || {
        let mut pickup = scheduled_pickup();
        let result = pickup.cancel(&client_for(&base));
        (result, pickup)
    })
    .await;

    assert!(matches!(
        result,
        Err(ResourceError::InvalidResponse { resource: "Pickup", .. })
    ));
    assert_eq!(pickup, scheduled_pickup());
    assert_eq!(pickup.confirmation.as_deref(), Some("WTC123456"));
}

#[test]
fn test_cancel_with_truncated_body_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/v2", listener.local_addr().unwrap());

    // Promise 500 bytes, send a fragment, then hang up.
    let server = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n{\"id\": \"pickup_abc\", ",
            )
            .unwrap();
        stream.flush().unwrap();
    });

    let mut pickup = scheduled_pickup();
    let result = pickup.cancel(&client_for(&base));
    server.join().unwrap();

    assert!(matches!(
        result,
        Err(ResourceError::Rest(RestError::Http(HttpError::Network(_))))
    ));
    assert_eq!(pickup, scheduled_pickup());
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_all_passes_pagination_and_reads_has_more() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pickups"))
        .and(query_param("page_size", "2"))
        .and(query_param("before_id", "pickup_z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pickups": [pickup_json("pickup_y", "scheduled"), pickup_json("pickup_x", "canceled")],
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v2", server.uri());
    let page = run_blocking(move || {
        Pickup::all(
            &client_for(&base),
            Some(ListParams {
                page_size: Some(2),
                before_id: Some("pickup_z".to_string()),
                ..Default::default()
            }),
        )
    })
    .await
    .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more());
    assert_eq!(page[1].status, Some(PickupStatus::Canceled));
}
