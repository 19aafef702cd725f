use account_service::config::Config;
use account_service::startup::connect_database;
use account_service::startup::run_migrations;
use account_service::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing("account_service=debug,sqlx=warn");

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Running database migrations"
    );

    let config = Config::load()?;
    tracing::info!(database_url = %config.database.redacted_url(), "Configuration loaded");

    let pool = connect_database(&config.database).await?;
    run_migrations(&pool).await?;

    pool.close().await;
    Ok(())
}
