//! EDI update trigger.

use crate::server::{
    error::{auth::AuthError, edi::EdiError, Error},
    model::{app::EdiState, edi::EdiUpdateResult},
    util::secret::constant_time_eq,
};

pub struct EdiService<'a> {
    edi: &'a EdiState,
}

impl<'a> EdiService<'a> {
    /// Creates a new instance of [`EdiService`]
    pub fn new(edi: &'a EdiState) -> Self {
        Self { edi }
    }

    /// Verifies the caller's API key, then runs one EDI update.
    ///
    /// The update routine is never invoked unless the key matches.
    ///
    /// # Returns
    /// - `Ok(EdiUpdateResult)` - Update completed, with the partner's result payload
    /// - `Err(Error::AuthError)` - Key missing or not matching the configured key
    /// - `Err(Error::EdiError)` - Partner call failed or the partner reported failure
    pub async fn trigger_update(&self, api_key: Option<&str>) -> Result<EdiUpdateResult, Error> {
        let api_key = api_key.ok_or(AuthError::MissingApiKey)?;
        if !constant_time_eq(api_key, &self.edi.api_key) {
            return Err(AuthError::InvalidApiKey.into());
        }

        Ok(self.run_update().await?)
    }

    /// Runs one EDI update without authorization, for the in-process cron job.
    pub async fn run_update(&self) -> Result<EdiUpdateResult, EdiError> {
        let result = self.edi.updater.run_update().await?;

        if !result.success {
            return Err(EdiError::UpdateFailed(
                result
                    .error
                    .unwrap_or_else(|| "partner reported an unsuccessful update".to_string()),
            ));
        }

        tracing::info!("EDI update completed");

        Ok(result)
    }
}
