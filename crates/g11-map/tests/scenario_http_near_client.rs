//! Scenario: HTTP nearby-points client
//!
//! 1. Coordinates are substituted into the path in shortest form.
//! 2. Both payload shapes decode.
//! 3. A server error surfaces its status and `message`.
//! 4. A non-JSON success body is a decode error.
//!
//! Runs against an in-process mock server; no external network.

use g11_map::{HttpNearClient, NearClient};
use g11_schemas::LatLng;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn fetches_envelope_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/near/60/105");
            then.status(200)
                .header("content-type", "text/json")
                .json_body(json!({"points": [
                    {"_id": "b", "title": "B", "url": "http://x/b",
                     "loc": {"coordinates": [105.1, 60.1]}, "dis": 2.0},
                    {"_id": "a", "title": "A", "url": "http://x/a",
                     "loc": {"coordinates": [105.2, 60.2]}, "dis": 1.0}
                ]}));
        })
        .await;

    let client = HttpNearClient::new(server.base_url(), "/near/{lat}/{lng}");
    let points = client.fetch_near(LatLng::new(60.0, 105.0)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].id(), "b");
    assert_eq!(points[1].dis, Some(1.0));
}

#[tokio::test]
async fn fetches_raw_geo_near_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/near/-1.5/2.25");
            then.status(200).json_body(json!([
                {"obj": {"_id": "x", "title": "X", "url": "u", "loc": {"coordinates": [2.25, -1.5]}}, "dis": 0.0}
            ]));
        })
        .await;

    let client = HttpNearClient::new(server.base_url(), "/near/{lat}/{lng}");
    let points = client.fetch_near(LatLng::new(-1.5, 2.25)).await.unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].position(), LatLng::new(-1.5, 2.25));
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/near/1/2");
            then.status(500)
                .json_body(json!({"message": "ConnectionFailure('db down')"}));
        })
        .await;

    let client = HttpNearClient::new(server.base_url(), "/near/{lat}/{lng}");
    let err = client.fetch_near(LatLng::new(1.0, 2.0)).await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("status=500"), "{msg}");
    assert!(msg.contains("db down"), "{msg}");
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/near/1/2");
            then.status(200).body("Sorry, Nothing at this URL.");
        })
        .await;

    let client = HttpNearClient::new(server.base_url(), "/near/{lat}/{lng}");
    let err = client.fetch_near(LatLng::new(1.0, 2.0)).await.unwrap_err();
    assert!(err.to_string().contains("decode"));
}
