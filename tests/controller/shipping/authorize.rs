use axum::http::{header, StatusCode};
use shipgate::server::router;
use shipgate_test_utils::prelude::*;

use crate::{
    util::request::{get, send, send_raw},
    TestSetupExt,
};

/// Expect a 302 redirect to the carrier authorization page carrying the user as state
#[tokio::test]
async fn redirects_to_carrier() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let response = send_raw(app, get("/shipping/fedex/auth?user_id=user-1")).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with(&test.carrier_endpoints("fedex").auth_url));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("state=user-1"));

    Ok(())
}

/// Expect 400 for a carrier outside fedex, ups & dhl
#[tokio::test]
async fn rejects_unknown_carrier() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, get("/shipping/usps/auth?user_id=user-1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    Ok(())
}

/// Expect 400 without a user
#[tokio::test]
async fn rejects_missing_user() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, get("/shipping/ups/auth")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "success": false, "error": "user_id is required" }));

    Ok(())
}
