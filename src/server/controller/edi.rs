use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Map, Value};

use crate::{
    model::{api::ErrorDto, edi::EdiFailureDto},
    server::{error::Error, model::app::AppState, service::edi::EdiService},
};

pub static EDI_TAG: &str = "edi";

static API_KEY_HEADER: &str = "x-api-key";

/// Trigger an EDI update
///
/// Requires the shared secret in the `x-api-key` header. On success the partner's result
/// payload is merged into the response body.
///
/// # Responses
/// - 200 (OK): Update completed
/// - 401 (Unauthorized): API key missing or invalid, no update is run
/// - 500 (Internal Server Error): Partner request failed or reported failure
#[utoipa::path(
    post,
    path = "/edi/scheduled-update",
    tag = EDI_TAG,
    params(
        ("x-api-key" = String, Header, description = "Shared secret for the EDI trigger")
    ),
    responses(
        (status = 200, description = "EDI update completed, partner result fields are merged into the body"),
        (status = 401, description = "API key missing or invalid", body = ErrorDto),
        (status = 500, description = "EDI update failed", body = EdiFailureDto)
    ),
)]
pub async fn scheduled_update(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    let result = EdiService::new(&state.edi).trigger_update(api_key).await?;

    let mut body = Map::new();
    body.insert("success".to_string(), json!(true));
    body.insert("message".to_string(), json!("EDI update completed"));
    body.extend(result.payload);

    Ok((StatusCode::OK, Json(Value::Object(body))))
}
