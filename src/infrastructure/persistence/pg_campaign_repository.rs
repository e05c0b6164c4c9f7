//! PostgreSQL implementation of campaign repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Campaign, CampaignStatus};
use crate::domain::repositories::CampaignRepository;
use crate::error::AppError;

/// PostgreSQL repository for campaign lookups.
pub struct PgCampaignRepository {
    pool: Arc<PgPool>,
}

impl PgCampaignRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CampaignRow {
    campaign_id: Uuid,
    link_id: Uuid,
    status: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    target_url: String,
}

impl TryFrom<CampaignRow> for Campaign {
    type Error = AppError;

    fn try_from(row: CampaignRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<CampaignStatus>()
            .map_err(AppError::internal)?;

        Ok(Campaign {
            campaign_id: row.campaign_id,
            link_id: row.link_id,
            status,
            start_date: row.start_date,
            end_date: row.end_date,
            target_url: row.target_url,
        })
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn find_by_link_id(&self, link_id: Uuid) -> Result<Option<Campaign>, AppError> {
        let row = sqlx::query_as::<_, CampaignRow>(
            r#"
            SELECT campaign_id, link_id, status::text AS status, start_date, end_date, target_url
            FROM campaigns
            WHERE link_id = $1
            "#,
        )
        .bind(link_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Campaign::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
