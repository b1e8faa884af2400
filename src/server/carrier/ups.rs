//! UPS REST API adapter.
//!
//! UPS authenticates token requests with an HTTP Basic header built from the client id &
//! secret, and requires `transId`/`transactionSrc` headers on every API call.

use async_trait::async_trait;
use chrono::Utc;
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

static SCOPES: &[&str] = &["read"];
static PICKUP_PATH: &str = "/api/pickupcreation/v2409/pickup";
static TRACK_PATH: &str = "/api/track/v1/details";
static TRANSACTION_SOURCE: &str = "shipgate";

pub struct UpsAdapter {
    oauth: CarrierOAuth,
    http: reqwest::Client,
    api_url: String,
}

impl UpsAdapter {
    pub fn new(config: &CarrierConfig, http: reqwest::Client) -> Result<Self, ConfigError> {
        Ok(Self {
            oauth: CarrierOAuth::new(
                Carrier::Ups,
                config,
                AuthType::BasicAuth,
                SCOPES,
                http.clone(),
            )?,
            http,
            api_url: config.api_url.clone(),
        })
    }

    fn request<U: reqwest::IntoUrl>(
        &self,
        method: reqwest::Method,
        url: U,
        access_token: &str,
    ) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(access_token)
            .header("transId", Utc::now().timestamp_millis().to_string())
            .header("transactionSrc", TRANSACTION_SOURCE)
    }
}

/// UPS reports failures as `{"response": {"errors": [{"code": ..., "message": ...}]}}`.
fn error_message(body: &Value) -> Option<String> {
    body.get("response")?
        .get("errors")?
        .get(0)?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl CarrierAdapter for UpsAdapter {
    fn carrier(&self) -> Carrier {
        Carrier::Ups
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
            .request(
                reqwest::Method::POST,
                endpoint(&self.api_url, PICKUP_PATH),
                access_token,
            )
            .json(&json!({ "PickupCreationRequest": pickup_details }));

        send_json(Carrier::Ups, request, error_message).await
    }

    async fn track_shipment(
        &self,
        access_token: &str,
        tracking_number: &str,
    ) -> Result<Value, ShippingError> {
        let mut url = reqwest::Url::parse(&endpoint(&self.api_url, TRACK_PATH)).map_err(|e| {
            ShippingError::CarrierApi {
                carrier: Carrier::Ups,
                status: None,
                message: e.to_string(),
            }
        })?;
        url.path_segments_mut()
            .map_err(|_| ShippingError::CarrierApi {
                carrier: Carrier::Ups,
                status: None,
                message: "configured API URL cannot take a path".to_string(),
            })?
            .push(tracking_number);

        let request = self.request(reqwest::Method::GET, url, access_token);

        send_json(Carrier::Ups, request, error_message).await
    }
}
