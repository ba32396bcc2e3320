//! SMTP implementation of campaign delivery.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::json;

use crate::config::SmtpConfig;
use crate::domain::entities::Campaign;
use crate::error::AppError;
use crate::infrastructure::mail::CampaignMailer;

/// Delivers campaigns over SMTP with STARTTLS.
///
/// One message is sent per contact: the campaign name becomes the subject
/// and the content becomes the plain-text body. The first transport error
/// aborts the dispatch.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds a mailer from SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host is unusable or the sender
    /// address does not parse as a mailbox.
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from.parse()?,
        })
    }
}

#[async_trait]
impl CampaignMailer for SmtpMailer {
    async fn send(&self, campaign: &Campaign) -> Result<(), AppError> {
        for contact in campaign.contacts() {
            let recipient: Mailbox = contact.email().parse().map_err(dispatch_error)?;

            let message = Message::builder()
                .from(self.from.clone())
                .to(recipient)
                .subject(campaign.name())
                .header(ContentType::TEXT_PLAIN)
                .body(campaign.content().to_string())
                .map_err(dispatch_error)?;

            self.transport.send(message).await.map_err(dispatch_error)?;
        }

        tracing::info!(
            campaign_id = %campaign.id(),
            recipients = campaign.contacts().len(),
            "Campaign dispatched over SMTP"
        );
        Ok(())
    }
}

/// Hides the transport detail behind the internal error kind.
fn dispatch_error(e: impl std::fmt::Display) -> AppError {
    tracing::error!(error = %e, "SMTP dispatch failed");
    AppError::internal("Mail dispatch failed", json!({}))
}
