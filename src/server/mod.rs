//! Server application core modules.
//!
//! HTTP routing, carrier integrations, the carrier token store, the EDI update trigger and
//! its optional cron schedule.

pub mod carrier;
pub mod config;
pub mod controller;
pub mod data;
pub mod edi;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
