pub use sea_orm_migration::prelude::*;

mod m20251017_000001_shipping_tokens;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251017_000001_shipping_tokens::Migration)]
    }
}
