//! Stored carrier token fixtures.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn token<'a>(&'a mut self) -> TokenFixtures<'a> {
        TokenFixtures { setup: self }
    }
}

pub struct TokenFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> TokenFixtures<'a> {
    /// Insert a carrier token row directly, bypassing the application's upsert.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the token
    /// - `carrier` - Lowercase carrier name, e.g. `fedex`
    /// - `access_token` - Stored access token
    /// - `refresh_token` - Stored refresh token, if any
    /// - `expires_at` - Expiry instant (UTC)
    pub async fn insert_token(
        &self,
        user_id: &str,
        carrier: &str,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_at: NaiveDateTime,
    ) -> Result<entity::shipping_token::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::ShippingToken::insert(entity::shipping_token::ActiveModel {
                user_id: ActiveValue::Set(user_id.to_string()),
                carrier: ActiveValue::Set(carrier.to_string()),
                access_token: ActiveValue::Set(access_token.to_string()),
                refresh_token: ActiveValue::Set(refresh_token.map(str::to_string)),
                expires_at: ActiveValue::Set(expires_at),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Fetch the stored token for a user & carrier, if any.
    pub async fn get_token(
        &self,
        user_id: &str,
        carrier: &str,
    ) -> Result<Option<entity::shipping_token::Model>, TestError> {
        Ok(
            entity::prelude::ShippingToken::find_by_id((user_id.to_string(), carrier.to_string()))
                .one(&self.setup.db)
                .await?,
        )
    }
}
