use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        shipping::{AuthorizationResultDto, PickupRequestDto, ShippingResultDto, TrackingRequestDto},
    },
    server::{
        error::{shipping::ShippingError, Error},
        model::{
            app::AppState,
            carrier::Carrier,
            shipping::{PickupRequest, TrackingQuery},
        },
        service::{auth::CarrierAuthService, shipping::ShippingService},
    },
};

pub static SHIPPING_TAG: &str = "shipping";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthorizeParams {
    /// User the carrier token will belong to
    pub user_id: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code issued by the carrier
    pub code: Option<String>,
    /// User the token belongs to, falls back to `state`
    pub user_id: Option<String>,
    /// OAuth state echoed back by the carrier
    pub state: Option<String>,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ShippingError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ShippingError::Validation(rejection.body_text()))
}

/// Schedule a pickup with a carrier
///
/// Dispatches the pickup details to the requested carrier unchanged (apart from carrier-specific
/// wrapping) and relays the carrier's confirmation. With `userId`, that user's stored carrier
/// token is used; otherwise an application token is requested.
///
/// # Responses
/// - 200 (OK): Carrier confirmation in `result`
/// - 400 (Bad Request): Missing field, malformed body or unknown carrier
/// - 401 (Unauthorized): User has no valid token for the carrier
/// - 500 (Internal Server Error): Carrier or token exchange failure
#[utoipa::path(
    post,
    path = "/shipping/pickup",
    tag = SHIPPING_TAG,
    request_body = PickupRequestDto,
    responses(
        (status = 200, description = "Pickup scheduled", body = ShippingResultDto),
        (status = 400, description = "Invalid request or unknown carrier", body = ErrorDto),
        (status = 401, description = "Carrier token missing or expired", body = ErrorDto),
        (status = 500, description = "Carrier request failed", body = ErrorDto)
    ),
)]
pub async fn schedule_pickup(
    State(state): State<AppState>,
    payload: Result<Json<PickupRequestDto>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let request = PickupRequest::try_from(json_body(payload)?)?;

    let result = ShippingService::new(&state.db, &state.carriers)
        .schedule_pickup(request)
        .await?;

    Ok((StatusCode::OK, Json(ShippingResultDto::new(result))))
}

/// Track a shipment with a carrier
///
/// # Responses
/// - 200 (OK): Carrier tracking payload in `result`
/// - 400 (Bad Request): Missing field, malformed body or unknown carrier
/// - 401 (Unauthorized): User has no valid token for the carrier
/// - 500 (Internal Server Error): Carrier or token exchange failure
#[utoipa::path(
    post,
    path = "/shipping/track",
    tag = SHIPPING_TAG,
    request_body = TrackingRequestDto,
    responses(
        (status = 200, description = "Tracking status", body = ShippingResultDto),
        (status = 400, description = "Invalid request or unknown carrier", body = ErrorDto),
        (status = 401, description = "Carrier token missing or expired", body = ErrorDto),
        (status = 500, description = "Carrier request failed", body = ErrorDto)
    ),
)]
pub async fn track_shipment(
    State(state): State<AppState>,
    payload: Result<Json<TrackingRequestDto>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let query = TrackingQuery::try_from(json_body(payload)?)?;

    let result = ShippingService::new(&state.db, &state.carriers)
        .track_shipment(query)
        .await?;

    Ok((StatusCode::OK, Json(ShippingResultDto::new(result))))
}

/// Start carrier authorization for a user
///
/// Redirects to the carrier's authorization page. The carrier calls back to
/// `/shipping/{carrier}/callback` with the user ID in `state`.
///
/// # Responses
/// - 302 (Found): Redirect to the carrier authorization URL
/// - 400 (Bad Request): Unknown carrier or missing `user_id`
#[utoipa::path(
    get,
    path = "/shipping/{carrier}/auth",
    tag = SHIPPING_TAG,
    params(
        ("carrier" = String, Path, description = "Carrier name: fedex, ups or dhl"),
        AuthorizeParams
    ),
    responses(
        (status = 302, description = "Redirect to the carrier authorization page"),
        (status = 400, description = "Unknown carrier or missing user_id", body = ErrorDto)
    ),
)]
pub async fn authorize(
    State(state): State<AppState>,
    Path(carrier): Path<String>,
    Query(params): Query<AuthorizeParams>,
) -> Result<impl IntoResponse, Error> {
    let carrier: Carrier = carrier.parse()?;

    let url = CarrierAuthService::new(&state.db, &state.carriers)
        .authorization_url(carrier, params.user_id.as_deref())?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]))
}

/// Carrier OAuth callback
///
/// Exchanges the authorization code for a token and stores it for the user, replacing any
/// token previously stored for the same carrier. Only token metadata is returned.
///
/// # Responses
/// - 200 (OK): Token stored
/// - 400 (Bad Request): Unknown carrier, missing `code` or missing user
/// - 500 (Internal Server Error): Code exchange failed or the token could not be stored
#[utoipa::path(
    get,
    path = "/shipping/{carrier}/callback",
    tag = SHIPPING_TAG,
    params(
        ("carrier" = String, Path, description = "Carrier name: fedex, ups or dhl"),
        CallbackParams
    ),
    responses(
        (status = 200, description = "Carrier token stored", body = AuthorizationResultDto),
        (status = 400, description = "Missing code or unknown carrier", body = ErrorDto),
        (status = 500, description = "Token exchange failed", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    Path(carrier): Path<String>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let carrier: Carrier = carrier.parse()?;
    let user_id = params
        .user_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .or(params.state.as_deref());

    let data = CarrierAuthService::new(&state.db, &state.carriers)
        .handle_callback(carrier, params.code.as_deref(), user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AuthorizationResultDto {
            success: true,
            data,
        }),
    ))
}
