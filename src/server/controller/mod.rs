//! HTTP controller endpoints.
//!
//! Axum handlers translate requests into service calls and service results into the JSON
//! envelopes clients expect. Every handler is annotated for the OpenAPI document.

pub mod edi;
pub mod shipping;
