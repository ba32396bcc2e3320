//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, SMTP transport, service wiring,
//! and the Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;

use crate::application::services::{AuthService, CampaignService};
use crate::config::Config;
use crate::infrastructure::mail::SmtpMailer;
use crate::infrastructure::persistence::PgCampaignRepository;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - SMTP mailer
/// - Campaign and auth services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migrations, SMTP setup, or
/// the server bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let repository = Arc::new(PgCampaignRepository::new(Arc::new(pool)));
    let mailer = Arc::new(SmtpMailer::new(&config.smtp).context("Failed to set up SMTP mailer")?);
    let campaign_service = Arc::new(CampaignService::new(repository, mailer));
    let auth_service = Arc::new(AuthService::new(&config.auth_jwt_secret));

    let state = AppState {
        campaign_service,
        auth_service,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
