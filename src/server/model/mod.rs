//! Server application models and type definitions.
//!
//! This module contains the application state shared by HTTP handlers, carrier identity and
//! token types, validated shipping requests, and the EDI update result.

pub mod app;
pub mod carrier;
pub mod edi;
pub mod shipping;
