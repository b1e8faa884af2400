use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::model::carrier::Carrier};

/// Errors raised while validating, authorizing, or dispatching a carrier request.
#[derive(Error, Debug)]
pub enum ShippingError {
    /// A required field is missing from the inbound request.
    #[error("{0}")]
    Validation(String),
    /// The carrier name is not fedex, ups, or dhl.
    #[error("Unknown carrier '{0}', expected one of fedex, ups, dhl")]
    UnknownCarrier(String),
    /// The carrier's token endpoint rejected the grant or returned malformed data.
    #[error("OAuth token exchange with {carrier} failed: {message}")]
    OAuthExchange { carrier: Carrier, message: String },
    /// A pickup or tracking call to the carrier failed.
    #[error("{carrier} API request failed: {message}")]
    CarrierApi {
        carrier: Carrier,
        status: Option<u16>,
        message: String,
    },
    /// No token is stored for the user, the carrier must be authorized first.
    #[error("No {carrier} token stored for user {user_id}, authorize the carrier first")]
    TokenNotFound { user_id: String, carrier: Carrier },
    /// The stored token expired and cannot be refreshed.
    #[error("{carrier} token for user {user_id} has expired, authorize the carrier again")]
    TokenExpired { user_id: String, carrier: Carrier },
}

impl IntoResponse for ShippingError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::UnknownCarrier(_) => {
                tracing::debug!("{}", self);

                StatusCode::BAD_REQUEST
            }
            Self::TokenNotFound { user_id, carrier } | Self::TokenExpired { user_id, carrier } => {
                tracing::info!(
                    user_id = %user_id,
                    carrier = %carrier,
                    "{}",
                    self
                );

                StatusCode::UNAUTHORIZED
            }
            Self::OAuthExchange { carrier, .. } => {
                tracing::error!(carrier = %carrier, "{}", self);

                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::CarrierApi {
                carrier, status, ..
            } => {
                tracing::error!(carrier = %carrier, vendor_status = ?status, "{}", self);

                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorDto::new(self.to_string()))).into_response()
    }
}
