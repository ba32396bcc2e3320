//! Business logic services for the application layer.

pub mod auth_service;
pub mod campaign_service;

pub use auth_service::{AuthService, AuthenticatedUser};
pub use campaign_service::{CampaignService, CampaignView, NewCampaign};
