use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request body for scheduling a carrier pickup
///
/// Every field is optional on the wire so that missing values surface as validation
/// errors in the standard error envelope rather than as extractor rejections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PickupRequestDto {
    /// Carrier name: `fedex`, `ups`, or `dhl`
    pub carrier: Option<String>,
    /// Carrier-specific pickup details (address, time window, package count)
    #[schema(value_type = Option<Object>)]
    pub pickup_details: Option<serde_json::Value>,
    /// User whose stored carrier token should be used for the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Request body for tracking a shipment
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRequestDto {
    /// Carrier name: `fedex`, `ups`, or `dhl`
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    /// User whose stored carrier token should be used for the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Successful carrier operation, wrapping the carrier's raw response
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ShippingResultDto {
    pub success: bool,
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
}

impl ShippingResultDto {
    pub fn new(result: serde_json::Value) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Stored token metadata returned after a completed carrier authorization
///
/// Token secrets are never echoed back to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarrierTokenDto {
    pub user_id: String,
    pub carrier: String,
    pub expires_at: NaiveDateTime,
    pub has_refresh_token: bool,
}

/// Successful carrier authorization callback
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthorizationResultDto {
    pub success: bool,
    pub data: CarrierTokenDto,
}
