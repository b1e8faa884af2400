use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("EDI update trigger rejected: x-api-key header missing")]
    MissingApiKey,
    #[error("EDI update trigger rejected: x-api-key header does not match configured key")]
    InvalidApiKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!(security_event = true, "{}", self);

        (StatusCode::UNAUTHORIZED, Json(ErrorDto::new("Unauthorized"))).into_response()
    }
}
