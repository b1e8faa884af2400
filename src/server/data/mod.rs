//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations. The service persists
//! one table: OAuth tokens issued by shipping carriers, keyed by user & carrier.

pub mod shipping_token;
