use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::domain::ports::{CustomerRepository, EmailService, ReservationRepository};
use crate::domain::services::{
    auth_service::AuthService, notification_service::NotificationService,
    reservation_service::ReservationService,
};
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    postgres_customer_repo::PostgresCustomerRepo, postgres_reservation_repo::PostgresReservationRepo,
    sqlite_customer_repo::SqliteCustomerRepo, sqlite_reservation_repo::SqliteReservationRepo,
};

pub fn load_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("outdoor_confirmation.html", include_str!("../templates/outdoor_confirmation.html")),
        ("table_confirmation.html", include_str!("../templates/table_confirmation.html")),
        ("room_confirmation.html", include_str!("../templates/room_confirmation.html")),
    ])
    .map_err(|e| AppError::InternalWithMsg(format!("Failed to load email templates: {}", e)))?;
    Ok(tera)
}

/// Wires services over already-built adapters.
pub fn assemble_state(
    config: &Config,
    reservation_repo: Arc<dyn ReservationRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
) -> Result<AppState, AppError> {
    let notifications = NotificationService::new(
        email_service,
        templates,
        Duration::from_millis(config.mail_timeout_ms),
    );

    Ok(AppState {
        config: config.clone(),
        customer_repo,
        reservations: Arc::new(ReservationService::new(reservation_repo)),
        notifications: Arc::new(notifications),
        auth_service: Arc::new(AuthService::new(config.clone())?),
    })
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
        config.mail_from_alias.clone(),
    ));
    let templates = Arc::new(load_templates()?);

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse()?;
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        assemble_state(
            config,
            Arc::new(PostgresReservationRepo::new(pool.clone())),
            Arc::new(PostgresCustomerRepo::new(pool)),
            email_service,
            templates,
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        assemble_state(
            config,
            Arc::new(SqliteReservationRepo::new(pool.clone())),
            Arc::new(SqliteCustomerRepo::new(pool)),
            email_service,
            templates,
        )
    }
}

async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Postgres migrations failed: {}", e)))
}

async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("SQLite migrations failed: {}", e)))
}
