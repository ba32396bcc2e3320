//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, before the server runs.
//! A `.env` file is honored in development via dotenvy.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string
//! - `AUTH_JWT_SECRET` - HS256 secret used to verify bearer tokens
//! - `SMTP_HOST` - SMTP relay hostname
//! - `SMTP_FROM` - sender address for outgoing campaign mail
//!
//! ## Optional Variables
//!
//! - `LISTEN` - bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - log level filter (default: `info`)
//! - `SMTP_PORT` - relay port (default: 587)
//! - `SMTP_USER` / `SMTP_PASSWORD` - relay credentials
//! - `DB_MAX_CONNECTIONS` - pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - pool acquire timeout in seconds (default: 30)

use std::env;

use anyhow::{Context, Result};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// HS256 secret the auth service verifies bearer tokens against.
    pub auth_jwt_secret: String,
    pub smtp: SmtpConfig,
    pub db_max_connections: u32,
    pub db_connect_timeout: u64,
}

/// SMTP relay settings for campaign delivery.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let auth_jwt_secret = env::var("AUTH_JWT_SECRET").context("AUTH_JWT_SECRET must be set")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let smtp = SmtpConfig {
            host: env::var("SMTP_HOST").context("SMTP_HOST must be set")?,
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            username: env::var("SMTP_USER").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
            from: env::var("SMTP_FROM").context("SMTP_FROM must be set")?,
        };

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            listen_addr,
            auth_jwt_secret,
            smtp,
            db_max_connections,
            db_connect_timeout,
        })
    }
}
