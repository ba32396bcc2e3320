//! Campaign use-case orchestration.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::Campaign;
use crate::domain::repositories::CampaignRepository;
use crate::error::AppError;
use crate::infrastructure::mail::CampaignMailer;

/// Input for the create use case.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub content: String,
    pub emails: Vec<String>,
    pub created_by: String,
}

/// Read-only projection of a campaign returned by the query use cases.
///
/// Exposes the recipient count instead of the raw contact list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignView {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    pub status: String,
    pub created_by: String,
    pub amount_of_emails_to_send: usize,
}

impl From<&Campaign> for CampaignView {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id(),
            name: campaign.name().to_string(),
            content: campaign.content().to_string(),
            status: campaign.status().as_str().to_string(),
            created_by: campaign.created_by().to_string(),
            amount_of_emails_to_send: campaign.contacts().len(),
        }
    }
}

/// Orchestrates the campaign use cases against the persistence and mail
/// dispatch ports.
///
/// Each call runs to completion on its own: the service loads its own copy
/// of the aggregate, checks the lifecycle gate, and performs at most one
/// collaborator round trip per phase. There is no locking or conditional
/// update here — under concurrent access the race sits at the store, not in
/// memory.
pub struct CampaignService {
    repository: Arc<dyn CampaignRepository>,
    mailer: Arc<dyn CampaignMailer>,
}

impl CampaignService {
    pub fn new(repository: Arc<dyn CampaignRepository>, mailer: Arc<dyn CampaignMailer>) -> Self {
        Self { repository, mailer }
    }

    /// Creates and persists a new campaign, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] unchanged when a field violates the
    /// construction rules; any persistence failure is collapsed to
    /// [`AppError::Internal`].
    pub async fn create(&self, new_campaign: NewCampaign) -> Result<Uuid, AppError> {
        let campaign = Campaign::new(
            new_campaign.name,
            new_campaign.content,
            new_campaign.emails,
            new_campaign.created_by,
        )?;

        self.repository
            .create(&campaign)
            .await
            .map_err(|e| to_internal(e, "Failed to persist campaign"))?;

        tracing::info!(campaign_id = %campaign.id(), "Campaign created");
        Ok(campaign.id())
    }

    /// Loads a campaign and projects it into the read-only view.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no campaign has the id; any other
    /// repository failure yields [`AppError::Internal`].
    pub async fn get_by(&self, id: Uuid) -> Result<CampaignView, AppError> {
        let campaign = self.load(id).await?;
        Ok(CampaignView::from(&campaign))
    }

    /// Lists every stored campaign as read-only views.
    pub async fn list(&self) -> Result<Vec<CampaignView>, AppError> {
        let campaigns = self
            .repository
            .list_all()
            .await
            .map_err(|e| to_internal(e, "Failed to load campaigns"))?;

        Ok(campaigns.iter().map(CampaignView::from).collect())
    }

    /// Cancels a pending campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] unless the campaign is `Pending`.
    pub async fn cancel(&self, id: Uuid) -> Result<(), AppError> {
        let mut campaign = self.load(id).await?;
        campaign.cancel()?;

        self.repository
            .update(&campaign)
            .await
            .map_err(|e| to_internal(e, "Failed to persist campaign status"))?;

        tracing::info!(campaign_id = %id, "Campaign canceled");
        Ok(())
    }

    /// Deletes a pending campaign from the system of record.
    ///
    /// The aggregate is marked deleted before the physical removal is
    /// issued. The status check and the delete are not atomic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] unless the campaign is `Pending`.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut campaign = self.load(id).await?;
        campaign.mark_deleted()?;

        self.repository
            .delete(&campaign)
            .await
            .map_err(|e| to_internal(e, "Failed to delete campaign"))?;

        tracing::info!(campaign_id = %id, "Campaign deleted");
        Ok(())
    }

    /// Dispatches a pending campaign to its recipients and marks it done.
    ///
    /// The status gate runs before dispatch. A dispatch failure leaves the
    /// aggregate untouched and nothing is written back. When dispatch
    /// succeeds but recording the new status fails, the error is still
    /// internal — the mail has already gone out, so the send is
    /// at-least-once while the recorded status stays best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] unless the campaign is `Pending`;
    /// dispatch and persistence failures yield [`AppError::Internal`].
    pub async fn start(&self, id: Uuid) -> Result<(), AppError> {
        let mut campaign = self.load(id).await?;
        if !campaign.is_pending() {
            return Err(AppError::invalid_state(
                "Campaign status invalid",
                json!({ "status": campaign.status().as_str() }),
            ));
        }

        self.mailer
            .send(&campaign)
            .await
            .map_err(|e| to_internal(e, "Failed to dispatch campaign"))?;

        campaign.complete()?;
        self.repository
            .update(&campaign)
            .await
            .map_err(|e| to_internal(e, "Failed to persist campaign status"))?;

        tracing::info!(campaign_id = %id, "Campaign dispatched");
        Ok(())
    }

    /// Loads the aggregate, telling not-found apart from storage failure.
    async fn load(&self, id: Uuid) -> Result<Campaign, AppError> {
        self.repository
            .get_by(id)
            .await
            .map_err(|e| to_internal(e, "Failed to load campaign"))?
            .ok_or_else(|| AppError::not_found("Campaign not found", json!({ "id": id })))
    }
}

/// Collapses a collaborator failure into the opaque internal kind.
///
/// The original error is logged but never surfaced to the caller.
fn to_internal(err: AppError, message: &str) -> AppError {
    tracing::error!(error = ?err, "{}", message);
    AppError::internal(message, json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CampaignStatus;
    use crate::domain::repositories::MockCampaignRepository;
    use crate::infrastructure::mail::MockCampaignMailer;
    use chrono::Utc;

    fn new_campaign_input() -> NewCampaign {
        NewCampaign {
            name: "Test Y".to_string(),
            content: "body HI!".to_string(),
            emails: vec!["teste1@test.com".to_string()],
            created_by: "teste@teste.com.br".to_string(),
        }
    }

    fn pending_campaign() -> Campaign {
        Campaign::new(
            "CampaignX".to_string(),
            "Bodyteste".to_string(),
            vec!["email1@e.com".to_string(), "email2@e.com".to_string()],
            "teste@teste.com.br".to_string(),
        )
        .unwrap()
    }

    fn campaign_with_status(status: CampaignStatus) -> Campaign {
        Campaign::restore(
            Uuid::new_v4(),
            "CampaignX".to_string(),
            "Bodyteste".to_string(),
            vec!["email1@e.com".to_string()],
            status,
            "teste@teste.com.br".to_string(),
            Utc::now(),
        )
    }

    fn make_service(
        repository: MockCampaignRepository,
        mailer: MockCampaignMailer,
    ) -> CampaignService {
        CampaignService::new(Arc::new(repository), Arc::new(mailer))
    }

    fn storage_failure() -> AppError {
        AppError::internal("error to save on database", json!({}))
    }

    #[tokio::test]
    async fn test_create_persists_once_and_returns_id() {
        let input = new_campaign_input();
        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_create()
            .withf(|campaign: &Campaign| {
                campaign.name() == "Test Y"
                    && campaign.content() == "body HI!"
                    && campaign.contacts().len() == 1
                    && campaign.created_by() == "teste@teste.com.br"
                    && campaign.status() == CampaignStatus::Pending
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let id = service.create(input).await.unwrap();

        assert!(!id.is_nil());
    }

    #[tokio::test]
    async fn test_create_surfaces_validation_error_unchanged() {
        let mut input = new_campaign_input();
        input.name = String::new();

        // No expectation on the repository: a create call would panic.
        let service = make_service(MockCampaignRepository::new(), MockCampaignMailer::new());
        let err = service.create(input).await.unwrap_err();

        match err {
            AppError::Validation { message, .. } => {
                assert_eq!(message, "name is required with min 5");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_repository_failure_is_internal() {
        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(storage_failure()));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let err = service.create(new_campaign_input()).await.unwrap_err();

        match err {
            AppError::Internal { message, .. } => {
                // The raw cause stays hidden.
                assert_eq!(message, "Failed to persist campaign");
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_by_returns_view() {
        let campaign = pending_campaign();
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        let stored = campaign.clone();
        mock_repo
            .expect_get_by()
            .withf(move |candidate: &Uuid| *candidate == id)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let view = service.get_by(id).await.unwrap();

        assert_eq!(view.id, campaign.id());
        assert_eq!(view.name, campaign.name());
        assert_eq!(view.content, campaign.content());
        assert_eq!(view.status, "Pending");
        assert_eq!(view.created_by, campaign.created_by());
        assert_eq!(view.amount_of_emails_to_send, 2);
    }

    #[tokio::test]
    async fn test_get_by_missing_campaign_is_not_found() {
        let mut mock_repo = MockCampaignRepository::new();
        mock_repo.expect_get_by().times(1).returning(|_| Ok(None));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let err = service.get_by(Uuid::new_v4()).await.unwrap_err();

        match err {
            AppError::NotFound { message, .. } => assert_eq!(message, "Campaign not found"),
            other => panic!("expected not found error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_by_repository_failure_is_internal() {
        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(|_| Err(storage_failure()));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let err = service.get_by(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_list_projects_every_campaign() {
        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![pending_campaign(), pending_campaign()]));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let views = service.list().await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].amount_of_emails_to_send, 2);
    }

    #[tokio::test]
    async fn test_delete_non_pending_is_invalid_state() {
        let campaign = campaign_with_status(CampaignStatus::Started);
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));
        // No expectation on delete: it must never be invoked.

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let err = service.delete(id).await.unwrap_err();

        match err {
            AppError::InvalidState { message, .. } => {
                assert_eq!(message, "Campaign status invalid");
            }
            other => panic!("expected invalid state error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_pending_campaign() {
        let campaign = pending_campaign();
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));
        mock_repo
            .expect_delete()
            .withf(move |candidate: &Campaign| {
                candidate.id() == id && candidate.status() == CampaignStatus::Deleted
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        assert!(service.delete(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_repository_failure_is_internal() {
        let campaign = pending_campaign();
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_| Err(storage_failure()));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let err = service.delete(id).await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_start_non_pending_is_invalid_state() {
        let campaign = campaign_with_status(CampaignStatus::Started);
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));
        // Neither the mailer nor update may be touched.

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let err = service.start(id).await.unwrap_err();

        match err {
            AppError::InvalidState { message, .. } => {
                assert_eq!(message, "Campaign status invalid");
            }
            other => panic!("expected invalid state error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_dispatches_and_marks_done() {
        let campaign = pending_campaign();
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));
        mock_repo
            .expect_update()
            .withf(move |candidate: &Campaign| {
                candidate.id() == id && candidate.status() == CampaignStatus::Done
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut mock_mailer = MockCampaignMailer::new();
        mock_mailer
            .expect_send()
            .withf(move |candidate: &Campaign| candidate.id() == id)
            .times(1)
            .returning(|_| Ok(()));

        let service = make_service(mock_repo, mock_mailer);
        assert!(service.start(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_start_dispatch_failure_writes_nothing() {
        let campaign = pending_campaign();
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));
        // No expectation on update: a send failure must not be recorded.

        let mut mock_mailer = MockCampaignMailer::new();
        mock_mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(AppError::internal("smtp down", json!({}))));

        let service = make_service(mock_repo, mock_mailer);
        let err = service.start(id).await.unwrap_err();

        match err {
            AppError::Internal { message, .. } => {
                assert_eq!(message, "Failed to dispatch campaign");
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_update_failure_after_send_is_internal() {
        let campaign = pending_campaign();
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));
        mock_repo
            .expect_update()
            .times(1)
            .returning(|_| Err(storage_failure()));

        let mut mock_mailer = MockCampaignMailer::new();
        mock_mailer.expect_send().times(1).returning(|_| Ok(()));

        let service = make_service(mock_repo, mock_mailer);
        let err = service.start(id).await.unwrap_err();

        match err {
            AppError::Internal { message, .. } => {
                assert_eq!(message, "Failed to persist campaign status");
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_pending_campaign() {
        let campaign = pending_campaign();
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));
        mock_repo
            .expect_update()
            .withf(|candidate: &Campaign| candidate.status() == CampaignStatus::Canceled)
            .times(1)
            .returning(|_| Ok(()));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        assert!(service.cancel(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_non_pending_is_invalid_state() {
        let campaign = campaign_with_status(CampaignStatus::Done);
        let id = campaign.id();

        let mut mock_repo = MockCampaignRepository::new();
        mock_repo
            .expect_get_by()
            .times(1)
            .returning(move |_| Ok(Some(campaign.clone())));

        let service = make_service(mock_repo, MockCampaignMailer::new());
        let err = service.cancel(id).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidState { .. }));
    }
}
