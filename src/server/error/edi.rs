use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::edi::EdiFailureDto;

#[derive(Error, Debug)]
pub enum EdiError {
    /// The partner endpoint could not be reached or answered with a failure status.
    #[error("EDI partner request failed: {0}")]
    Partner(String),
    /// The update routine ran but reported failure.
    #[error("EDI update reported failure: {0}")]
    UpdateFailed(String),
}

impl IntoResponse for EdiError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        let error = match self {
            Self::Partner(message) | Self::UpdateFailed(message) => message,
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(EdiFailureDto {
                message: "EDI update failed".to_string(),
                error,
            }),
        )
            .into_response()
    }
}
