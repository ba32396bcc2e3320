//! HTTP request handlers for API endpoints.

pub mod campaigns;
pub mod health;

pub use campaigns::{
    cancel_campaign_handler, create_campaign_handler, delete_campaign_handler,
    get_campaign_handler, list_campaigns_handler, start_campaign_handler,
};
pub use health::health_handler;
