use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{carrier::CarrierRegistry, edi::EdiUpdater};

/// Shared secret & collaborator for the EDI update trigger.
#[derive(Clone)]
pub struct EdiState {
    pub api_key: String,
    pub updater: Arc<dyn EdiUpdater>,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub carriers: CarrierRegistry,
    pub edi: EdiState,
}
