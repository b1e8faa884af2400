use sea_orm_migration::{prelude::*, schema::*};

static PK_SHIPPING_TOKENS: &str = "pk_shipping_tokens";
static IDX_SHIPPING_TOKENS_EXPIRES_AT: &str = "idx_shipping_tokens_expires_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShippingTokens::Table)
                    .if_not_exists()
                    .col(string(ShippingTokens::UserId))
                    .col(string_len(ShippingTokens::Carrier, 16))
                    .col(text(ShippingTokens::AccessToken))
                    .col(text_null(ShippingTokens::RefreshToken))
                    .col(timestamp(ShippingTokens::ExpiresAt))
                    .col(timestamp(ShippingTokens::CreatedAt))
                    .col(timestamp(ShippingTokens::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .name(PK_SHIPPING_TOKENS)
                            .col(ShippingTokens::UserId)
                            .col(ShippingTokens::Carrier),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SHIPPING_TOKENS_EXPIRES_AT)
                    .table(ShippingTokens::Table)
                    .col(ShippingTokens::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SHIPPING_TOKENS_EXPIRES_AT)
                    .table(ShippingTokens::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShippingTokens::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ShippingTokens {
    Table,
    UserId,
    Carrier,
    AccessToken,
    RefreshToken,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
