use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::account::service::AccountService;
use crate::account::service::AccountServiceSettings;
use crate::config::Config;
use crate::config::DatabaseConfig;
use crate::notifications::SmtpNotificationSender;
use crate::repositories::PostgresAccountRepository;
use crate::repositories::PostgresActivationTokenRepository;

/// Account service wired to PostgreSQL and SMTP.
pub type DefaultAccountService = AccountService<
    PostgresAccountRepository,
    PostgresActivationTokenRepository,
    SmtpNotificationSender,
>;

pub async fn connect_database(config: &DatabaseConfig) -> Result<PgPool, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");
    Ok(())
}

pub fn service_settings(config: &Config) -> AccountServiceSettings {
    AccountServiceSettings {
        activation_url: config.activation.url.clone(),
        activation_email_subject: config.activation.email_subject.clone(),
        session_expiration_hours: config.jwt.expiration_hours,
    }
}

/// Acquire every collaborator once and assemble the service.
///
/// Expects migrations to have been applied already.
pub async fn build_account_service(
    config: &Config,
) -> Result<Arc<DefaultAccountService>, anyhow::Error> {
    let pool = connect_database(&config.database).await?;

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let accounts = Arc::new(PostgresAccountRepository::new(pool.clone()));
    let tokens = Arc::new(PostgresActivationTokenRepository::new(pool));
    let notifier = Arc::new(SmtpNotificationSender::new(&config.smtp)?);

    Ok(Arc::new(AccountService::new(
        accounts,
        tokens,
        notifier,
        authenticator,
        service_settings(config),
    )))
}
