//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for the append-only `clicks` table.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO clicks (
                click_id, link_id, campaign_id, user_id, status, fraud_check_failed,
                ip_address, user_agent, referrer, gaid, idfa
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(click.click_id)
        .bind(click.link_id)
        .bind(click.campaign_id)
        .bind(click.user_id)
        .bind(click.status)
        .bind(click.fraud_reasons)
        .bind(click.ip)
        .bind(click.user_agent)
        .bind(click.referrer)
        .bind(click.gaid)
        .bind(click.idfa)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_by_ip_within(&self, ip: &str, window: Duration) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM clicks
            WHERE ip_address = $1 AND created_at >= NOW() - make_interval(secs => $2)
            "#,
        )
        .bind(ip)
        .bind(window.num_seconds() as f64)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
