//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup and handed to each component at construction,
//! so nothing downstream reads the process environment directly.

use std::time::Duration;

use crate::server::{error::config::ConfigError, model::carrier::Carrier};

static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
static DEFAULT_CARRIER_TIMEOUT_SECS: u64 = 30;

/// OAuth client & API settings for a single shipping carrier.
#[derive(Clone, Debug)]
pub struct CarrierConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Shipper account number, used by carriers that require it on pickup requests
    pub account_number: Option<String>,
}

impl CarrierConfig {
    /// Reads `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`, and `{PREFIX}_REDIRECT_URI`,
    /// falling back to the carrier's production endpoints when `{PREFIX}_AUTH_URL`,
    /// `{PREFIX}_TOKEN_URL`, or `{PREFIX}_API_URL` are unset.
    pub fn from_env(carrier: Carrier) -> Result<Self, ConfigError> {
        let prefix = carrier.env_prefix();
        let defaults = carrier.default_endpoints();

        Ok(Self {
            client_id: required(&format!("{}_CLIENT_ID", prefix))?,
            client_secret: required(&format!("{}_CLIENT_SECRET", prefix))?,
            redirect_uri: required(&format!("{}_REDIRECT_URI", prefix))?,
            auth_url: optional(&format!("{}_AUTH_URL", prefix))
                .unwrap_or_else(|| defaults.auth_url.to_string()),
            token_url: optional(&format!("{}_TOKEN_URL", prefix))
                .unwrap_or_else(|| defaults.token_url.to_string()),
            api_url: optional(&format!("{}_API_URL", prefix))
                .unwrap_or_else(|| defaults.api_url.to_string()),
            account_number: optional(&format!("{}_ACCOUNT_NUMBER", prefix)),
        })
    }
}

/// Settings for the partner EDI update job.
#[derive(Clone, Debug)]
pub struct EdiConfig {
    /// Shared secret expected in the `x-api-key` header of trigger requests
    pub api_key: String,
    pub partner_url: String,
    pub partner_token: Option<String>,
    /// Optional cron expression to also run the update in-process
    pub update_cron: Option<String>,
}

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub carrier_timeout: Duration,
    pub fedex: CarrierConfig,
    pub ups: CarrierConfig,
    pub dhl: CarrierConfig,
    pub edi: EdiConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let carrier_timeout_secs = match optional("CARRIER_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: "CARRIER_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_CARRIER_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            carrier_timeout: Duration::from_secs(carrier_timeout_secs),
            fedex: CarrierConfig::from_env(Carrier::Fedex)?,
            ups: CarrierConfig::from_env(Carrier::Ups)?,
            dhl: CarrierConfig::from_env(Carrier::Dhl)?,
            edi: EdiConfig {
                api_key: required("EDI_API_KEY")?,
                partner_url: required("EDI_PARTNER_URL")?,
                partner_token: optional("EDI_PARTNER_TOKEN"),
                update_cron: optional("EDI_UPDATE_CRON"),
            },
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "value is empty".to_string(),
        }),
        Err(_) => Err(ConfigError::MissingEnvVar(var.to_string())),
    }
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}
