//! Campaign aggregate: recipient contacts, field validation, and the
//! status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::error::AppError;

/// Bounds for the campaign name, inclusive.
pub const NAME_MIN: usize = 5;
pub const NAME_MAX: usize = 24;

/// Bounds for the campaign content, inclusive.
pub const CONTENT_MIN: usize = 5;
pub const CONTENT_MAX: usize = 1024;

/// A single recipient of a campaign.
///
/// Contacts carry no identity of their own; they exist only inside the
/// campaign that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    email: String,
}

impl Contact {
    /// Validates and wraps a recipient address.
    pub fn new(email: impl Into<String>) -> Result<Self, AppError> {
        let email = email.into();
        if !email.validate_email() {
            return Err(AppError::bad_request(
                "email is invalid",
                json!({ "email": email }),
            ));
        }
        Ok(Self { email })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Lifecycle states of a campaign.
///
/// `Pending` is the only state transitions are allowed from; every other
/// state is absorbing. The core never produces `Started` itself — it exists
/// for callers that flag a campaign as in-flight out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStatus {
    Pending,
    Started,
    Done,
    Canceled,
    Deleted,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Started => "Started",
            Self::Done => "Done",
            Self::Canceled => "Canceled",
            Self::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Started" => Ok(Self::Started),
            "Done" => Ok(Self::Done),
            "Canceled" => Ok(Self::Canceled),
            "Deleted" => Ok(Self::Deleted),
            other => Err(AppError::internal(
                "Invalid campaign status",
                json!({ "status": other }),
            )),
        }
    }
}

/// The campaign aggregate root.
///
/// A campaign is only obtained through [`Campaign::new`] (validated
/// construction) or [`Campaign::restore`] (rehydration of an aggregate that
/// already passed validation, e.g. loaded from storage). Fields are private:
/// the status changes only through the transition methods, each of which
/// succeeds exclusively from `Pending`.
#[derive(Debug, Clone)]
pub struct Campaign {
    id: Uuid,
    name: String,
    content: String,
    contacts: Vec<Contact>,
    status: CampaignStatus,
    created_by: String,
    created_on: DateTime<Utc>,
}

impl Campaign {
    /// Builds a new campaign from raw input.
    ///
    /// Validation runs in a fixed order and stops at the first failure:
    /// name bounds, content bounds, recipient count, recipient addresses,
    /// creator address. On success the campaign gets a fresh id, `Pending`
    /// status, and the current instant as `created_on`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming the failing field and rule,
    /// e.g. `"name is required with min 5"` or `"createdby is invalid"`.
    pub fn new(
        name: String,
        content: String,
        emails: Vec<String>,
        created_by: String,
    ) -> Result<Self, AppError> {
        if name.chars().count() < NAME_MIN {
            return Err(AppError::bad_request(
                "name is required with min 5",
                json!({ "field": "name", "min": NAME_MIN }),
            ));
        }
        if name.chars().count() > NAME_MAX {
            return Err(AppError::bad_request(
                "name is required with max 24",
                json!({ "field": "name", "max": NAME_MAX }),
            ));
        }

        if content.chars().count() < CONTENT_MIN {
            return Err(AppError::bad_request(
                "content is required with min 5",
                json!({ "field": "content", "min": CONTENT_MIN }),
            ));
        }
        if content.chars().count() > CONTENT_MAX {
            return Err(AppError::bad_request(
                "content is required with max 1024",
                json!({ "field": "content", "max": CONTENT_MAX }),
            ));
        }

        if emails.is_empty() {
            return Err(AppError::bad_request(
                "contacts is required with min 1",
                json!({ "field": "contacts", "min": 1 }),
            ));
        }

        let contacts = emails
            .into_iter()
            .map(Contact::new)
            .collect::<Result<Vec<_>, _>>()?;

        if !created_by.validate_email() {
            return Err(AppError::bad_request(
                "createdby is invalid",
                json!({ "field": "createdby" }),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            content,
            contacts,
            status: CampaignStatus::Pending,
            created_by,
            created_on: Utc::now(),
        })
    }

    /// Rebuilds an aggregate that already satisfied validation, e.g. one
    /// loaded from the database. Field validation is not re-run.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        name: String,
        content: String,
        emails: Vec<String>,
        status: CampaignStatus,
        created_by: String,
        created_on: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            content,
            contacts: emails.into_iter().map(|email| Contact { email }).collect(),
            status,
            created_by,
            created_on,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn is_pending(&self) -> bool {
        self.status == CampaignStatus::Pending
    }

    /// Pending → Canceled.
    pub fn cancel(&mut self) -> Result<(), AppError> {
        self.transition(CampaignStatus::Canceled)
    }

    /// Pending → Deleted. Precedes physical removal from storage.
    pub fn mark_deleted(&mut self) -> Result<(), AppError> {
        self.transition(CampaignStatus::Deleted)
    }

    /// Pending → Done. Called after a successful dispatch.
    pub fn complete(&mut self) -> Result<(), AppError> {
        self.transition(CampaignStatus::Done)
    }

    fn transition(&mut self, next: CampaignStatus) -> Result<(), AppError> {
        if self.status != CampaignStatus::Pending {
            return Err(AppError::invalid_state(
                "Campaign status invalid",
                json!({ "status": self.status.as_str() }),
            ));
        }
        self.status = next;
        Ok(())
    }
}
