//! DTOs for campaign endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a campaign.
///
/// `created_by` is not part of the payload — it comes from the
/// authenticated caller. Field rules (lengths, recipient addresses) are
/// enforced by the domain constructor so the validation order and messages
/// stay a single contract.
#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub emails: Vec<String>,
}

/// Response returned after creating a campaign.
#[derive(Debug, Serialize)]
pub struct CreateCampaignResponse {
    pub id: Uuid,
}
