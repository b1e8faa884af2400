use axum::http::StatusCode;
use chrono::{TimeDelta, Utc};
use mockito::Matcher;
use serde_json::json;
use shipgate::server::router;
use shipgate_test_utils::prelude::*;

use crate::{
    util::request::{post_json, send},
    TestSetupExt,
};

/// Expect the UPS confirmation wrapped in a success envelope using the user's token
#[tokio::test]
async fn schedules_pickup_with_user_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_shipping_tables()
        .with_stored_token(
            TEST_USER_ID,
            "ups",
            TEST_ACCESS_TOKEN,
            Some(TEST_REFRESH_TOKEN),
            (Utc::now() + TimeDelta::hours(1)).naive_utc(),
        )
        .with_mock(|setup| {
            setup
                .server
                .mock("POST", "/ups/api/pickupcreation/v2409/pickup")
                .match_header("authorization", "Bearer access-token")
                .match_body(Matcher::PartialJson(json!({
                    "PickupCreationRequest": { "RatePickupIndicator": "N" }
                })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({ "PickupCreationResponse": { "PRN": "2929602E9CP" } }).to_string())
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(
        app,
        post_json(
            "/shipping/pickup",
            json!({
                "carrier": "ups",
                "pickupDetails": { "RatePickupIndicator": "N" },
                "userId": TEST_USER_ID
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "result": { "PickupCreationResponse": { "PRN": "2929602E9CP" } }
        })
    );
    test.assert_mocks();

    Ok(())
}

/// Expect 400 & no carrier call when pickupDetails is missing
#[tokio::test]
async fn rejects_missing_pickup_details() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_shipping_tables()
        .with_client_credentials_endpoint("dhl", "app-token", 0)
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, post_json("/shipping/pickup", json!({ "carrier": "dhl" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "error": "pickupDetails is required" })
    );
    test.assert_mocks();

    Ok(())
}

/// Expect 401 when the user never authorized the carrier
#[tokio::test]
async fn rejects_user_without_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_shipping_tables().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(
        app,
        post_json(
            "/shipping/pickup",
            json!({ "carrier": "fedex", "pickupDetails": {}, "userId": TEST_USER_ID }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    Ok(())
}
