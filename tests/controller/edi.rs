use axum::{body::Body, http::Request, http::StatusCode};
use serde_json::json;
use shipgate::server::router;
use shipgate_test_utils::prelude::*;

use crate::{util::request::send, TestSetupExt};

fn trigger(api_key: Option<&str>) -> Request<Body> {
    let mut request = Request::post("/edi/scheduled-update");
    if let Some(api_key) = api_key {
        request = request.header("x-api-key", api_key);
    }

    request.body(Body::empty()).unwrap()
}

/// Expect the partner result merged into a success body for a matching key
#[tokio::test]
async fn runs_update_with_matching_key() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_edi_updates_endpoint(200, json!({ "ordersUpdated": 3 }), 1)
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, trigger(Some(TEST_EDI_API_KEY))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "EDI update completed", "ordersUpdated": 3 })
    );
    test.assert_mocks();

    Ok(())
}

/// Expect 401 & no partner call for a wrong key
#[tokio::test]
async fn rejects_wrong_key() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_edi_updates_endpoint(200, json!({}), 0)
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, trigger(Some("not-the-key"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "error": "Unauthorized" }));
    test.assert_mocks();

    Ok(())
}

/// Expect 401 & no partner call without a key
#[tokio::test]
async fn rejects_missing_key() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_edi_updates_endpoint(200, json!({}), 0)
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, _) = send(app, trigger(None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    test.assert_mocks();

    Ok(())
}

/// Expect 500 with message & error when the partner reports failure
#[tokio::test]
async fn reports_partner_failure() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_edi_updates_endpoint(200, json!({ "success": false, "error": "feed locked" }), 1)
        .build()
        .await?;
    let app = router::routes().with_state(test.into_app_state());

    let (status, body) = send(app, trigger(Some(TEST_EDI_API_KEY))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "message": "EDI update failed", "error": "feed locked" })
    );
    test.assert_mocks();

    Ok(())
}
