use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    carrier::{build_http_client, CarrierRegistry},
    config::Config,
    edi::PartnerEdiClient,
    error::Error,
    model::app::{AppState, EdiState},
    scheduler::Scheduler,
};

static DEFAULT_LOG_FILTER: &str = "info";

/// Install the global tracing subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the carrier adapters & EDI collaborator shared by all requests
pub fn build_state(config: &Config, db: DatabaseConnection) -> Result<AppState, Error> {
    let carriers = CarrierRegistry::from_config(config)?;

    let partner = PartnerEdiClient::new(
        build_http_client(config.carrier_timeout)?,
        config.edi.partner_url.clone(),
        config.edi.partner_token.clone(),
    );

    Ok(AppState {
        db,
        carriers,
        edi: EdiState {
            api_key: config.edi.api_key.clone(),
            updater: Arc::new(partner),
        },
    })
}

/// Start the EDI cron job when `EDI_UPDATE_CRON` is configured
pub async fn start_scheduler(config: &Config, state: &AppState) -> Result<Option<Scheduler>, Error> {
    let Some(cron_expression) = &config.edi.update_cron else {
        return Ok(None);
    };

    let scheduler = Scheduler::new(state.edi.clone()).await?;
    scheduler.start(cron_expression).await?;

    Ok(Some(scheduler))
}
