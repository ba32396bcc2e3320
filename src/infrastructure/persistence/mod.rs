//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.

pub mod pg_campaign_repository;

pub use pg_campaign_repository::PgCampaignRepository;
