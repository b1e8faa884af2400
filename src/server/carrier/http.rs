//! Request execution shared by the carrier adapters.

use reqwest::RequestBuilder;
use serde_json::Value;

use crate::server::{error::shipping::ShippingError, model::carrier::Carrier};

/// Pulls a human readable message out of a carrier's error response body.
pub type ErrorMessageExtractor = fn(&Value) -> Option<String>;

/// Sends a carrier API request and returns the carrier's raw JSON response.
///
/// # Arguments
/// - `carrier` - Carrier the request is sent to, used in errors & logs
/// - `request` - Fully built request including authorization
/// - `error_message` - Extracts the carrier's error message from a failure body
///
/// # Returns
/// - `Ok(Value)` - Response body of a 2xx response, `Value::Null` when the body is empty
/// - `Err(ShippingError::CarrierApi)` - Transport failure, timeout, non-2xx status, or a
///   success body that is not JSON
pub async fn send_json(
    carrier: Carrier,
    request: RequestBuilder,
    error_message: ErrorMessageExtractor,
) -> Result<Value, ShippingError> {
    let response = request.send().await.map_err(|e| ShippingError::CarrierApi {
        carrier,
        status: None,
        message: if e.is_timeout() {
            "request timed out".to_string()
        } else {
            e.to_string()
        },
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ShippingError::CarrierApi {
            carrier,
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| error_message(&value))
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("carrier responded with HTTP {}", status.as_u16())
                } else {
                    body.clone()
                }
            });

        return Err(ShippingError::CarrierApi {
            carrier,
            status: Some(status.as_u16()),
            message,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| ShippingError::CarrierApi {
        carrier,
        status: Some(status.as_u16()),
        message: format!("carrier returned a malformed response: {}", e),
    })
}

/// Joins the configured API base URL with an endpoint path.
pub fn endpoint(api_url: &str, path: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), path)
}
