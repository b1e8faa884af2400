//! Shipping carrier adapters.
//!
//! Every carrier implements the same [`CarrierAdapter`] capability set (authorize, schedule a
//! pickup, track a shipment) against its own REST API. The [`CarrierRegistry`] holds exactly one
//! adapter per [`Carrier`] variant, so dispatch is a single exhaustive `match`.

pub mod dhl;
pub mod fedex;
pub mod http;
pub mod oauth;
pub mod ups;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde_json::Value;

use crate::server::{
    carrier::{dhl::DhlAdapter, fedex::FedexAdapter, oauth::CarrierOAuth, ups::UpsAdapter},
    config::Config,
    error::{shipping::ShippingError, Error},
    model::carrier::Carrier,
};

/// Capability set shared by all carrier integrations.
#[async_trait]
pub trait CarrierAdapter: Send + Sync {
    fn carrier(&self) -> Carrier;

    /// OAuth client used for authorization URLs and token grants.
    fn oauth(&self) -> &CarrierOAuth;

    /// Schedules a pickup, returning the carrier's raw confirmation.
    async fn schedule_pickup(
        &self,
        access_token: &str,
        pickup_details: &Value,
    ) -> Result<Value, ShippingError>;

    /// Fetches tracking status, returning the carrier's raw tracking payload.
    async fn track_shipment(
        &self,
        access_token: &str,
        tracking_number: &str,
    ) -> Result<Value, ShippingError>;
}

#[derive(Clone)]
pub struct CarrierRegistry {
    fedex: Arc<dyn CarrierAdapter>,
    ups: Arc<dyn CarrierAdapter>,
    dhl: Arc<dyn CarrierAdapter>,
}

impl CarrierRegistry {
    pub fn new(
        fedex: Arc<dyn CarrierAdapter>,
        ups: Arc<dyn CarrierAdapter>,
        dhl: Arc<dyn CarrierAdapter>,
    ) -> Self {
        Self { fedex, ups, dhl }
    }

    /// Builds the production adapters for every carrier from configuration.
    ///
    /// All adapters share one HTTP client, which never follows redirects (required for OAuth
    /// token requests) and bounds every carrier call by `config.carrier_timeout`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let http = build_http_client(config.carrier_timeout)?;

        Ok(Self::new(
            Arc::new(FedexAdapter::new(&config.fedex, http.clone())?),
            Arc::new(UpsAdapter::new(&config.ups, http.clone())?),
            Arc::new(DhlAdapter::new(&config.dhl, http)?),
        ))
    }

    pub fn get(&self, carrier: Carrier) -> &dyn CarrierAdapter {
        match carrier {
            Carrier::Fedex => self.fedex.as_ref(),
            Carrier::Ups => self.ups.as_ref(),
            Carrier::Dhl => self.dhl.as_ref(),
        }
    }
}

pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .build()
}
