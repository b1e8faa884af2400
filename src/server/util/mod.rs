//! Utility functions and helpers for server operations.
//!
//! This module provides small reusable helpers: token expiry arithmetic and constant-time
//! comparison of shared secrets.

pub mod secret;
pub mod time;
