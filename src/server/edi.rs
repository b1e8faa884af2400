//! Partner EDI update collaborator.
//!
//! The trigger endpoint & optional cron job only know the [`EdiUpdater`] trait; the default
//! implementation pulls pending updates from the partner's HTTP API.

use async_trait::async_trait;

use crate::server::{error::edi::EdiError, model::edi::EdiUpdateResult};

static UPDATES_PATH: &str = "/updates";

#[async_trait]
pub trait EdiUpdater: Send + Sync {
    /// Runs one update pull against the partner system.
    async fn run_update(&self) -> Result<EdiUpdateResult, EdiError>;
}

pub struct PartnerEdiClient {
    http: reqwest::Client,
    partner_url: String,
    partner_token: Option<String>,
}

impl PartnerEdiClient {
    pub fn new(http: reqwest::Client, partner_url: String, partner_token: Option<String>) -> Self {
        Self {
            http,
            partner_url,
            partner_token,
        }
    }
}

#[async_trait]
impl EdiUpdater for PartnerEdiClient {
    async fn run_update(&self) -> Result<EdiUpdateResult, EdiError> {
        let url = format!("{}{}", self.partner_url.trim_end_matches('/'), UPDATES_PATH);

        let mut request = self.http.get(url);
        if let Some(token) = &self.partner_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EdiError::Partner(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(EdiError::Partner(format!(
                "partner responded with HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json::<EdiUpdateResult>()
            .await
            .map_err(|e| EdiError::Partner(format!("malformed partner response: {}", e)))
    }
}
