//! Carrier OAuth authorization service.
//!
//! Builds the authorization redirect for a user and completes the code exchange when the
//! carrier calls back, persisting the resulting token.

use chrono::Utc;
use oauth2::url::Url;
use sea_orm::DatabaseConnection;

use crate::{
    model::shipping::CarrierTokenDto,
    server::{
        carrier::CarrierRegistry,
        data::shipping_token::ShippingTokenRepository,
        error::{shipping::ShippingError, Error},
        model::carrier::{Carrier, CarrierToken},
    },
};

pub struct CarrierAuthService<'a> {
    db: &'a DatabaseConnection,
    carriers: &'a CarrierRegistry,
}

fn required<'v>(value: Option<&'v str>, field: &str) -> Result<&'v str, ShippingError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ShippingError::Validation(format!("{} is required", field)))
}

impl<'a> CarrierAuthService<'a> {
    /// Creates a new instance of [`CarrierAuthService`]
    pub fn new(db: &'a DatabaseConnection, carriers: &'a CarrierRegistry) -> Self {
        Self { db, carriers }
    }

    /// Builds the carrier authorization URL for a user.
    ///
    /// The user ID travels in the OAuth `state` parameter so the callback can attribute the
    /// token without a session.
    ///
    /// # Returns
    /// - `Ok(Url)` - Carrier authorization URL to redirect the user to
    /// - `Err(ShippingError::Validation)` - No user ID was provided
    pub fn authorization_url(
        &self,
        carrier: Carrier,
        user_id: Option<&str>,
    ) -> Result<Url, ShippingError> {
        let user_id = required(user_id, "user_id")?;

        Ok(self.carriers.get(carrier).oauth().authorization_url(user_id))
    }

    /// Exchanges the authorization code from a carrier callback & stores the token.
    ///
    /// A later authorization for the same user & carrier replaces the stored token.
    ///
    /// # Arguments
    /// - `carrier` - Carrier that issued the code
    /// - `code` - Authorization code from the callback query
    /// - `user_id` - User the token belongs to
    ///
    /// # Returns
    /// - `Ok(CarrierTokenDto)` - Metadata of the stored token, never the token itself
    /// - `Err(Error::ShippingError(Validation))` - `code` or `user_id` missing
    /// - `Err(Error::ShippingError(OAuthExchange))` - Carrier rejected the code or sent an
    ///   incomplete token response
    /// - `Err(Error::DbErr)` - Token could not be stored
    pub async fn handle_callback(
        &self,
        carrier: Carrier,
        code: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<CarrierTokenDto, Error> {
        let code = required(code, "code")?;
        let user_id = required(user_id, "user_id")?;

        let grant = self.carriers.get(carrier).oauth().exchange_code(code).await?;
        let token = CarrierToken::from_grant(user_id, carrier, grant, Utc::now())?;

        let stored = ShippingTokenRepository::new(self.db).upsert(&token).await?;

        tracing::info!(
            user_id = %stored.user_id,
            carrier = %carrier,
            "Stored carrier token after authorization"
        );

        Ok(CarrierTokenDto {
            has_refresh_token: stored.refresh_token.is_some(),
            user_id: stored.user_id,
            carrier: stored.carrier,
            expires_at: stored.expires_at,
        })
    }
}
