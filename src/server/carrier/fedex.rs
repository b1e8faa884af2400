//! FedEx REST API adapter.
//!
//! FedEx expects OAuth client credentials in the token request body and identifies the
//! shipper on pickup requests by account number.

use async_trait::async_trait;
use oauth2::AuthType;
use serde_json::{json, Value};

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

static SCOPES: &[&str] = &["CXS"];
static PICKUP_PATH: &str = "/pickup/v1/pickups";
static TRACK_PATH: &str = "/track/v1/trackingnumbers";

pub struct FedexAdapter {
    oauth: CarrierOAuth,
    http: reqwest::Client,
    api_url: String,
    account_number: Option<String>,
}

impl FedexAdapter {
    pub fn new(config: &CarrierConfig, http: reqwest::Client) -> Result<Self, ConfigError> {
        Ok(Self {
            oauth: CarrierOAuth::new(
                Carrier::Fedex,
                config,
                AuthType::RequestBody,
                SCOPES,
                http.clone(),
            )?,
            http,
            api_url: config.api_url.clone(),
            account_number: config.account_number.clone(),
        })
    }

    /// Adds the configured account number unless the caller already supplied one.
    fn pickup_payload(&self, pickup_details: &Value) -> Value {
        let mut payload = pickup_details.clone();

        if let (Some(account_number), Value::Object(fields)) =
            (&self.account_number, &mut payload)
        {
            fields
                .entry("associatedAccountNumber")
                .or_insert_with(|| json!({ "value": account_number }));
        }

        payload
    }
}

/// FedEx reports failures as `{"errors": [{"code": ..., "message": ...}]}`.
fn error_message(body: &Value) -> Option<String> {
    body.get("errors")?
        .get(0)?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl CarrierAdapter for FedexAdapter {
    fn carrier(&self) -> Carrier {
        Carrier::Fedex
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
            .json(&self.pickup_payload(pickup_details));

        send_json(Carrier::Fedex, request, error_message).await
    }

    async fn track_shipment(
        &self,
        access_token: &str,
        tracking_number: &str,
    ) -> Result<Value, ShippingError> {
        let request = self
            .http
            .post(endpoint(&self.api_url, TRACK_PATH))
            .bearer_auth(access_token)
            .json(&json!({
                "includeDetailedScans": true,
                "trackingInfo": [
                    { "trackingNumberInfo": { "trackingNumber": tracking_number } }
                ]
            }));

        send_json(Carrier::Fedex, request, error_message).await
    }
}
