//! PostgreSQL implementation of the campaign repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::entities::Campaign;
use crate::domain::repositories::CampaignRepository;
use crate::error::AppError;

/// PostgreSQL repository for campaign storage.
///
/// A campaign spans two tables: `campaigns` for the aggregate fields and
/// `campaign_contacts` for the owned recipient rows. Contacts are read back
/// in insertion order.
pub struct PgCampaignRepository {
    pool: Arc<PgPool>,
}

impl PgCampaignRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn campaign_from_row(row: &PgRow, emails: Vec<String>) -> Result<Campaign, AppError> {
        let status: String = row.try_get("status")?;

        Ok(Campaign::restore(
            row.try_get("id")?,
            row.try_get("name")?,
            row.try_get("content")?,
            emails,
            status.parse()?,
            row.try_get("created_by")?,
            row.try_get("created_on")?,
        ))
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn create(&self, campaign: &Campaign) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO campaigns (id, name, content, status, created_by, created_on)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(campaign.id())
        .bind(campaign.name())
        .bind(campaign.content())
        .bind(campaign.status().as_str())
        .bind(campaign.created_by())
        .bind(campaign.created_on())
        .execute(&mut *tx)
        .await?;

        for contact in campaign.contacts() {
            sqlx::query("INSERT INTO campaign_contacts (campaign_id, email) VALUES ($1, $2)")
                .bind(campaign.id())
                .bind(contact.email())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, campaign: &Campaign) -> Result<(), AppError> {
        sqlx::query("UPDATE campaigns SET status = $1 WHERE id = $2")
            .bind(campaign.status().as_str())
            .bind(campaign.id())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete(&self, campaign: &Campaign) -> Result<(), AppError> {
        // Contact rows go with the campaign via ON DELETE CASCADE.
        sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(campaign.id())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn get_by(&self, id: Uuid) -> Result<Option<Campaign>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, content, status, created_by, created_on
             FROM campaigns WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let emails: Vec<String> = sqlx::query_scalar(
            "SELECT email FROM campaign_contacts WHERE campaign_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(Some(Self::campaign_from_row(&row, emails)?))
    }

    async fn list_all(&self) -> Result<Vec<Campaign>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, content, status, created_by, created_on
             FROM campaigns ORDER BY created_on",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        let contact_rows =
            sqlx::query("SELECT campaign_id, email FROM campaign_contacts ORDER BY id")
                .fetch_all(self.pool.as_ref())
                .await?;

        let mut emails_by_campaign: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in contact_rows {
            emails_by_campaign
                .entry(row.try_get("campaign_id")?)
                .or_default()
                .push(row.try_get("email")?);
        }

        rows.iter()
            .map(|row| {
                let id: Uuid = row.try_get("id")?;
                let emails = emails_by_campaign.remove(&id).unwrap_or_default();
                Self::campaign_from_row(row, emails)
            })
            .collect()
    }
}
