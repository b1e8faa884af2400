use axum::http::StatusCode;
use chrono::{TimeDelta, Utc};
use serde_json::json;
use shipgate::server::router;
use shipgate_test_utils::prelude::*;

use crate::{
    util::request::{post_json, send},
    TestSetupExt,
};

/// Expect the carrier's tracking payload wrapped in a success envelope
#[tokio::test]
async fn returns_carrier_tracking_result() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_shipping_tables()
        .with_client_credentials_endpoint("fedex", "app-token", 1)
        .with_api_endpoint(
            "fedex",
            "POST",
            "/track/v1/trackingnumbers",
            200,
            json!({ "status": "delivered" }),
            1,
        )
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(
        app,
        post_json(
            "/shipping/track",
            json!({ "carrier": "fedex", "trackingNumber": "999" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "result": { "status": "delivered" } })
    );
    test.assert_mocks();

    Ok(())
}

/// Expect 400 & no carrier call for an unknown carrier
#[tokio::test]
async fn rejects_unknown_carrier() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_shipping_tables()
        .with_client_credentials_endpoint("fedex", "app-token", 0)
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(
        app,
        post_json(
            "/shipping/track",
            json!({ "carrier": "usps", "trackingNumber": "999" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("unknown carrier"));
    test.assert_mocks();

    Ok(())
}

/// Expect 400 for a missing tracking number
#[tokio::test]
async fn rejects_missing_tracking_number() -> Result<(), TestError> {
    let test = TestBuilder::new().with_shipping_tables().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, post_json("/shipping/track", json!({ "carrier": "ups" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "error": "trackingNumber is required" })
    );

    Ok(())
}

/// Expect 400 for a body that is not valid JSON
#[tokio::test]
async fn rejects_malformed_body() -> Result<(), TestError> {
    let test = TestBuilder::new().with_shipping_tables().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let request = axum::http::Request::post("/shipping/track")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    Ok(())
}

/// Expect 401 when the user's stored token expired without a refresh token
#[tokio::test]
async fn rejects_expired_user_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_shipping_tables()
        .with_stored_token(
            TEST_USER_ID,
            "dhl",
            TEST_ACCESS_TOKEN,
            None,
            (Utc::now() - TimeDelta::hours(2)).naive_utc(),
        )
        .with_api_endpoint("dhl", "GET", "/tracking", 200, json!({}), 0)
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(
        app,
        post_json(
            "/shipping/track",
            json!({ "carrier": "dhl", "trackingNumber": "9356579890", "userId": TEST_USER_ID }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    test.assert_mocks();

    Ok(())
}

/// Expect 500 with the carrier's message when the carrier call fails
#[tokio::test]
async fn relays_carrier_error() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_shipping_tables()
        .with_client_credentials_endpoint("ups", "app-token", 1)
        .with_api_endpoint(
            "ups",
            "GET",
            "/api/track/v1/details/1Z999",
            404,
            json!({ "response": { "errors": [{ "code": "151044", "message": "No tracking information available" }] } }),
            1,
        )
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(
        app,
        post_json(
            "/shipping/track",
            json!({ "carrier": "UPS", "trackingNumber": "1Z999" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("No tracking information available"));
    test.assert_mocks();

    Ok(())
}
