use chrono::Utc;
use sea_orm::{sea_query::OnConflict, ActiveValue, ConnectionTrait, DbErr, EntityTrait};

use crate::server::model::carrier::{Carrier, CarrierToken};

pub struct ShippingTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShippingTokenRepository<'a, C> {
    /// Creates a new instance of [`ShippingTokenRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Saves a token, replacing any token already stored for the same user & carrier
    ///
    /// The original `created_at` is kept when an existing token is replaced.
    pub async fn upsert(
        &self,
        token: &CarrierToken,
    ) -> Result<entity::shipping_token::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let token = entity::shipping_token::ActiveModel {
            user_id: ActiveValue::Set(token.user_id.clone()),
            carrier: ActiveValue::Set(token.carrier.as_str().to_string()),
            access_token: ActiveValue::Set(token.access_token.clone()),
            refresh_token: ActiveValue::Set(token.refresh_token.clone()),
            expires_at: ActiveValue::Set(token.expires_at.naive_utc()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        entity::prelude::ShippingToken::insert(token)
            .on_conflict(
                OnConflict::columns([
                    entity::shipping_token::Column::UserId,
                    entity::shipping_token::Column::Carrier,
                ])
                .update_columns([
                    entity::shipping_token::Column::AccessToken,
                    entity::shipping_token::Column::RefreshToken,
                    entity::shipping_token::Column::ExpiresAt,
                    entity::shipping_token::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get(
        &self,
        user_id: &str,
        carrier: Carrier,
    ) -> Result<Option<entity::shipping_token::Model>, DbErr> {
        entity::prelude::ShippingToken::find_by_id((
            user_id.to_string(),
            carrier.as_str().to_string(),
        ))
        .one(self.db)
        .await
    }
}
