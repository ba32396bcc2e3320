//! Repository trait for campaign data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Campaign;
use crate::error::AppError;

/// Repository interface for campaign persistence.
///
/// The service layer depends only on this trait; the concrete storage
/// technology stays behind it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCampaignRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Persists a newly created campaign together with its contacts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, campaign: &Campaign) -> Result<(), AppError>;

    /// Persists the current status of an existing campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, campaign: &Campaign) -> Result<(), AppError>;

    /// Physically removes a campaign and its contacts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, campaign: &Campaign) -> Result<(), AppError>;

    /// Loads a campaign by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Campaign))` if found
    /// - `Ok(None)` if not found
    ///
    /// Not-found is a distinct outcome rather than an error value, so
    /// callers never have to compare against a storage library's sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_by(&self, id: Uuid) -> Result<Option<Campaign>, AppError>;

    /// Loads every stored campaign, contacts included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<Campaign>, AppError>;
}
