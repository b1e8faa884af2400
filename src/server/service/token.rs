//! Carrier access token resolution.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    carrier::CarrierRegistry,
    data::shipping_token::ShippingTokenRepository,
    error::{shipping::ShippingError, Error},
    model::carrier::{Carrier, CarrierToken},
};

/// Resolves a usable access token before every authenticated carrier call.
pub struct TokenService<'a> {
    db: &'a DatabaseConnection,
    carriers: &'a CarrierRegistry,
}

impl<'a> TokenService<'a> {
    /// Creates a new instance of [`TokenService`]
    pub fn new(db: &'a DatabaseConnection, carriers: &'a CarrierRegistry) -> Self {
        Self { db, carriers }
    }

    /// Returns an access token for a carrier call.
    ///
    /// With a user, the stored token is used while it is still valid; an expired token is
    /// refreshed & persisted when a refresh token is available. Without a user, an application
    /// token is requested with the client credentials grant and not persisted.
    ///
    /// # Arguments
    /// - `carrier` - Carrier the call is made against
    /// - `user_id` - User whose stored token should be used, if any
    ///
    /// # Returns
    /// - `Ok(String)` - Access token to present as a bearer token
    /// - `Err(Error::ShippingError(TokenNotFound))` - User never authorized the carrier
    /// - `Err(Error::ShippingError(TokenExpired))` - Token expired & cannot be refreshed
    /// - `Err(Error::ShippingError(OAuthExchange))` - Carrier rejected the refresh or grant
    /// - `Err(Error::DbErr)` - Token store query failed
    pub async fn access_token(
        &self,
        carrier: Carrier,
        user_id: Option<&str>,
    ) -> Result<String, Error> {
        let Some(user_id) = user_id else {
            let grant = self.carriers.get(carrier).oauth().client_credentials().await?;

            return Ok(grant.access_token);
        };

        let repo = ShippingTokenRepository::new(self.db);

        let token: CarrierToken = repo
            .get(user_id, carrier)
            .await?
            .ok_or_else(|| ShippingError::TokenNotFound {
                user_id: user_id.to_string(),
                carrier,
            })?
            .try_into()?;

        let now = Utc::now();
        if !token.is_expired(now) {
            return Ok(token.access_token);
        }

        let Some(refresh_token) = token.refresh_token else {
            return Err(ShippingError::TokenExpired {
                user_id: user_id.to_string(),
                carrier,
            }
            .into());
        };

        let grant = self.carriers.get(carrier).oauth().refresh(&refresh_token).await?;

        let mut refreshed = CarrierToken::from_grant(user_id, carrier, grant, now)?;
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = Some(refresh_token);
        }

        repo.upsert(&refreshed).await?;

        tracing::debug!(
            user_id = %user_id,
            carrier = %carrier,
            expires_at = %refreshed.expires_at,
            "Refreshed expired carrier token"
        );

        Ok(refreshed.access_token)
    }
}
