//! Mail dispatch abstraction for campaign delivery.

use async_trait::async_trait;

use crate::domain::entities::Campaign;
use crate::error::AppError;

/// Capability for delivering a campaign to its recipients.
///
/// The campaign service invokes this once per start request with the full
/// aggregate. Delivery mechanics — transport, batching, templating — live
/// entirely behind this trait.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::SmtpMailer`] - SMTP delivery via lettre
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignMailer: Send + Sync {
    /// Delivers the campaign content to every contact.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when any message fails to send.
    async fn send(&self, campaign: &Campaign) -> Result<(), AppError>;
}
