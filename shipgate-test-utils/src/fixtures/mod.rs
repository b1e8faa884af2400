//! Fixtures mounted on a [`TestSetup`](crate::TestSetup) during test execution.
//!
//! - `carrier` - OAuth token & REST API endpoints of a mocked carrier
//! - `edi` - EDI partner update endpoint
//! - `token` - stored carrier token rows

pub mod carrier;
pub mod edi;
pub mod token;
