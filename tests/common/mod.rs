#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use uuid::Uuid;

use mailblast::application::services::{AuthService, CampaignService};
use mailblast::domain::entities::{Campaign, CampaignStatus};
use mailblast::domain::repositories::CampaignRepository;
use mailblast::error::AppError;
use mailblast::infrastructure::mail::CampaignMailer;
use mailblast::routes::app_router;
use mailblast::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_USER: &str = "teste@teste.com.br";

/// In-memory campaign store backing handler tests, so no database is needed.
#[derive(Default)]
pub struct InMemoryCampaignRepository {
    campaigns: Mutex<HashMap<Uuid, Campaign>>,
}

impl InMemoryCampaignRepository {
    /// Seeds a campaign directly, bypassing the create use case.
    pub fn insert(&self, campaign: Campaign) {
        self.campaigns
            .lock()
            .unwrap()
            .insert(campaign.id(), campaign);
    }

    pub fn get(&self, id: Uuid) -> Option<Campaign> {
        self.campaigns.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.campaigns.lock().unwrap().len()
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn create(&self, campaign: &Campaign) -> Result<(), AppError> {
        self.insert(campaign.clone());
        Ok(())
    }

    async fn update(&self, campaign: &Campaign) -> Result<(), AppError> {
        self.insert(campaign.clone());
        Ok(())
    }

    async fn delete(&self, campaign: &Campaign) -> Result<(), AppError> {
        self.campaigns.lock().unwrap().remove(&campaign.id());
        Ok(())
    }

    async fn get_by(&self, id: Uuid) -> Result<Option<Campaign>, AppError> {
        Ok(self.get(id))
    }

    async fn list_all(&self) -> Result<Vec<Campaign>, AppError> {
        Ok(self.campaigns.lock().unwrap().values().cloned().collect())
    }
}

/// Mailer double that records dispatched campaign ids and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Uuid>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn fail_next_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent_ids(&self) -> Vec<Uuid> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl CampaignMailer for RecordingMailer {
    async fn send(&self, campaign: &Campaign) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::internal("smtp unreachable", json!({})));
        }
        self.sent.lock().unwrap().push(campaign.id());
        Ok(())
    }
}

/// Builds the full application router (auth middleware included) on top of
/// the in-memory doubles.
pub fn make_server(
    repository: Arc<InMemoryCampaignRepository>,
    mailer: Arc<RecordingMailer>,
) -> TestServer {
    let state = AppState {
        campaign_service: Arc::new(CampaignService::new(repository, mailer)),
        auth_service: Arc::new(AuthService::new(TEST_SECRET)),
    };

    TestServer::new(app_router(state)).unwrap()
}

/// Signs a bearer token the test server's auth service accepts.
pub fn bearer_token(email: &str) -> String {
    let exp = (Utc::now().timestamp() + 3600) as usize;
    encode(
        &Header::default(),
        &json!({ "email": email, "exp": exp }),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// A freshly constructed pending campaign with two recipients.
pub fn pending_campaign() -> Campaign {
    Campaign::new(
        "CampaignX".to_string(),
        "Bodyteste".to_string(),
        vec!["email1@e.com".to_string(), "email2@e.com".to_string()],
        TEST_USER.to_string(),
    )
    .unwrap()
}

/// A campaign restored in an arbitrary lifecycle state.
pub fn campaign_with_status(status: CampaignStatus) -> Campaign {
    Campaign::restore(
        Uuid::new_v4(),
        "CampaignX".to_string(),
        "Bodyteste".to_string(),
        vec!["email1@e.com".to_string()],
        status,
        TEST_USER.to_string(),
        Utc::now(),
    )
}
