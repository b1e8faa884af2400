//! DHL Express (MyDHL API) adapter.

use async_trait::async_trait;
use oauth2::AuthType;
use serde_json::Value;

use crate::server::{
    carrier::{
        http::{endpoint, send_json},
        oauth::CarrierOAuth,
        CarrierAdapter,
    },
    config::CarrierConfig,
    error::{config::ConfigError, shipping::ShippingError},
    model::carrier::Carrier,
};

static SCOPES: &[&str] = &["pickup", "tracking"];
static PICKUP_PATH: &str = "/pickups";
static TRACK_PATH: &str = "/tracking";

pub struct DhlAdapter {
    oauth: CarrierOAuth,
    http: reqwest::Client,
    api_url: String,
}

impl DhlAdapter {
    pub fn new(config: &CarrierConfig, http: reqwest::Client) -> Result<Self, ConfigError> {
        Ok(Self {
            oauth: CarrierOAuth::new(
                Carrier::Dhl,
                config,
                AuthType::RequestBody,
                SCOPES,
                http.clone(),
            )?,
            http,
            api_url: config.api_url.clone(),
        })
    }
}

/// DHL reports failures as problem details: `{"title": ..., "detail": ..., "status": ...}`.
fn error_message(body: &Value) -> Option<String> {
    body.get("detail")
        .or_else(|| body.get("title"))?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl CarrierAdapter for DhlAdapter {
    fn carrier(&self) -> Carrier {
        Carrier::Dhl
    }

    fn oauth(&self) -> &CarrierOAuth {
        &self.oauth
    }

    async fn schedule_pickup(
        &self,
        access_token: &str,
        pickup_details: &Value,
    ) -> Result<Value, ShippingError> {
        let request = self
            .http
            .post(endpoint(&self.api_url, PICKUP_PATH))
            .bearer_auth(access_token)
            .json(pickup_details);

        send_json(Carrier::Dhl, request, error_message).await
    }

    async fn track_shipment(
        &self,
        access_token: &str,
        tracking_number: &str,
    ) -> Result<Value, ShippingError> {
        let request = self
            .http
            .get(endpoint(&self.api_url, TRACK_PATH))
            .bearer_auth(access_token)
            .query(&[("shipmentTrackingNumber", tracking_number)]);

        send_json(Carrier::Dhl, request, error_message).await
    }
}
