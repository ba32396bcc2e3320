//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain and application layers:
//!
//! - [`persistence`] - PostgreSQL repository implementation
//! - [`mail`] - Campaign delivery over SMTP

pub mod mail;
pub mod persistence;
