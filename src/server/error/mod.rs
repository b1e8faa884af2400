//! Error types for the shipgate server.
//!
//! This module provides the error hierarchy for the service, with specialized error types for
//! each domain (configuration, trigger authorization, shipping carriers, EDI updates). All
//! errors implement `IntoResponse` for Axum HTTP responses and use `thiserror` for ergonomic
//! error definitions with automatic `Display` and `Error` trait implementations.

pub mod auth;
pub mod config;
pub mod edi;
pub mod shipping;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, edi::EdiError, shipping::ShippingError},
};

/// Main error type for the shipgate server.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator. The `IntoResponse` implementation
/// maps errors to appropriate HTTP responses for API consumers.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Trigger authorization error (shared secret mismatch).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Shipping error (validation, unknown carrier, OAuth, carrier API, stored tokens).
    #[error(transparent)]
    ShippingError(#[from] ShippingError),
    /// EDI update error (partner request or reported failure).
    #[error(transparent)]
    EdiError(#[from] EdiError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// HTTP client error (client construction, TLS backend).
    #[error(transparent)]
    HttpClientError(#[from] reqwest::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// I/O error (binding the listener, serving connections).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// Domain errors carry their own response mappings; everything else is treated as an
/// internal server error (500) and logged.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ShippingError(err) => err.into_response(),
            Self::EdiError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}
