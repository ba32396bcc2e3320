//! Handler for the health check endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Liveness endpoint reporting service status and version.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
