use axum::http::StatusCode;
use serde_json::json;
use shipgate::server::router;
use shipgate_test_utils::prelude::*;

use crate::{
    util::request::{get, send},
    TestSetupExt,
};

/// Expect the exchanged token to be stored & only its metadata returned
#[tokio::test]
async fn stores_token_and_returns_metadata() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_shipping_tables()
        .with_token_endpoint(
            "ups",
            "authorization_code",
            mock_token_response("A", Some("R"), Some(3600)),
            1,
        )
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, get("/shipping/ups/callback?code=abc&user_id=user-1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["userId"], "user-1");
    assert_eq!(body["data"]["carrier"], "ups");
    assert_eq!(body["data"]["hasRefreshToken"], true);
    assert!(!body.to_string().contains("\"A\""));
    let stored = test.token().get_token("user-1", "ups").await?.unwrap();
    assert_eq!(stored.access_token, "A");
    test.assert_mocks();

    Ok(())
}

/// Expect UPS token responses with a string expires_in to be stored
#[tokio::test]
async fn stores_ups_token_with_string_expires_in() -> Result<(), TestError> {
    let mut token_response = mock_token_response("A", Some("R"), None);
    token_response["expires_in"] = json!("14399");

    let mut test = TestBuilder::new()
        .with_shipping_tables()
        .with_token_endpoint("ups", "authorization_code", token_response, 1)
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, get("/shipping/ups/callback?code=abc&user_id=user-1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let stored = test.token().get_token("user-1", "ups").await?.unwrap();
    assert!(stored.expires_at > chrono::Utc::now().naive_utc());
    test.assert_mocks();

    Ok(())
}

/// Expect the user to be taken from state when user_id is absent
#[tokio::test]
async fn falls_back_to_state_for_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_shipping_tables()
        .with_token_endpoint(
            "dhl",
            "authorization_code",
            mock_token_response("A", None, Some(1800)),
            1,
        )
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, get("/shipping/dhl/callback?code=abc&state=user-2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], "user-2");
    assert!(test.token().get_token("user-2", "dhl").await?.is_some());
    test.assert_mocks();

    Ok(())
}

/// Expect a repeated authorization to replace the stored token
#[tokio::test]
async fn replaces_previous_token() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_shipping_tables()
        .with_stored_token(
            "user-1",
            "fedex",
            "old",
            Some("old-refresh"),
            chrono::Utc::now().naive_utc(),
        )
        .with_token_endpoint(
            "fedex",
            "authorization_code",
            mock_token_response("new", None, Some(3600)),
            1,
        )
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, _) = send(app, get("/shipping/fedex/callback?code=abc&user_id=user-1")).await;

    assert_eq!(status, StatusCode::OK);
    let stored = test.token().get_token("user-1", "fedex").await?.unwrap();
    assert_eq!(stored.access_token, "new");
    assert_eq!(stored.refresh_token, None);
    test.assert_mocks();

    Ok(())
}

/// Expect 400 & no token exchange when code is missing
#[tokio::test]
async fn rejects_missing_code() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_shipping_tables()
        .with_token_endpoint(
            "ups",
            "authorization_code",
            mock_token_response("A", None, Some(3600)),
            0,
        )
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, get("/shipping/ups/callback?user_id=user-1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "code is required" }));
    test.assert_mocks();

    Ok(())
}

/// Expect 500 relaying the carrier's OAuth error when the code is rejected
#[tokio::test]
async fn relays_rejected_code() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_shipping_tables()
        .with_mock(|setup| {
            setup.carrier("ups").create_token_endpoint(
                "authorization_code",
                400,
                json!({ "error": "invalid_grant" }),
                1,
            )
        })
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, get("/shipping/ups/callback?code=stale&user_id=user-1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("invalid_grant"));
    test.assert_mocks();

    Ok(())
}
