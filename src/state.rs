use std::sync::Arc;

use crate::application::services::{AuthService, CampaignService};

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub campaign_service: Arc<CampaignService>,
    pub auth_service: Arc<AuthService>,
}
