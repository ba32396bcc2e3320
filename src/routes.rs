//! Top-level router combining public and authenticated routes.
//!
//! # Route Structure
//!
//! - `GET /health` - Liveness check (public)
//! - `/api/*`      - Campaign REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token verification on `/api`

use axum::routing::get;
use axum::{Router, middleware};

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
