//! Handlers for campaign endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::dto::campaign::{CreateCampaignRequest, CreateCampaignResponse};
use crate::application::services::{AuthenticatedUser, CampaignView, NewCampaign};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new campaign owned by the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/campaigns`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "CampaignX",
///   "content": "Bodyteste",
///   "emails": ["email1@e.com", "email2@e.com"]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with the domain's validation message when a
/// field violates the construction rules.
pub async fn create_campaign_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CreateCampaignResponse>), AppError> {
    let id = state
        .campaign_service
        .create(NewCampaign {
            name: payload.name,
            content: payload.content,
            emails: payload.emails,
            created_by: user.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreateCampaignResponse { id })))
}

/// Returns a single campaign as a read-only view.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}`
///
/// # Errors
///
/// Returns 404 Not Found when no campaign has the id.
pub async fn get_campaign_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<CampaignView>, AppError> {
    let view = state.campaign_service.get_by(id).await?;
    Ok(Json(view))
}

/// Lists every stored campaign.
///
/// # Endpoint
///
/// `GET /api/campaigns`
pub async fn list_campaigns_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CampaignView>>, AppError> {
    let views = state.campaign_service.list().await?;
    Ok(Json(views))
}

/// Deletes a pending campaign.
///
/// # Endpoint
///
/// `DELETE /api/campaigns/{id}`
///
/// # Errors
///
/// Returns 404 Not Found when no campaign has the id and 422 when the
/// campaign is no longer pending.
pub async fn delete_campaign_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.campaign_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cancels a pending campaign.
///
/// # Endpoint
///
/// `PATCH /api/campaigns/{id}/cancel`
///
/// # Errors
///
/// Returns 404 Not Found when no campaign has the id and 422 when the
/// campaign is no longer pending.
pub async fn cancel_campaign_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.campaign_service.cancel(id).await?;
    Ok(StatusCode::OK)
}

/// Dispatches a pending campaign to its recipients.
///
/// # Endpoint
///
/// `POST /api/campaigns/{id}/start`
///
/// # Errors
///
/// Returns 404 Not Found when no campaign has the id, 422 when the
/// campaign is no longer pending, and 500 when dispatch fails — in which
/// case the campaign stays pending and can be started again.
pub async fn start_campaign_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.campaign_service.start(id).await?;
    Ok(StatusCode::OK)
}
