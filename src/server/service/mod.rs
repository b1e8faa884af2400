//! Service layer for business logic.
//!
//! Services coordinate the token store, the carrier adapters and the EDI collaborator.
//! Controllers stay thin and only translate between HTTP and these services.

pub mod auth;
pub mod edi;
pub mod shipping;
pub mod token;
