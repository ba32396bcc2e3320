//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::api::handlers::{
    cancel_campaign_handler, create_campaign_handler, delete_campaign_handler,
    get_campaign_handler, list_campaigns_handler, start_campaign_handler,
};
use crate::state::AppState;

/// All campaign routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /campaigns`             - Create a campaign
/// - `GET    /campaigns`             - List campaigns
/// - `GET    /campaigns/{id}`        - Fetch a single campaign
/// - `DELETE /campaigns/{id}`        - Delete a pending campaign
/// - `PATCH  /campaigns/{id}/cancel` - Cancel a pending campaign
/// - `POST   /campaigns/{id}/start`  - Dispatch a pending campaign
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/campaigns",
            post(create_campaign_handler).get(list_campaigns_handler),
        )
        .route(
            "/campaigns/{id}",
            get(get_campaign_handler).delete(delete_campaign_handler),
        )
        .route("/campaigns/{id}/cancel", patch(cancel_campaign_handler))
        .route("/campaigns/{id}/start", post(start_campaign_handler))
}
