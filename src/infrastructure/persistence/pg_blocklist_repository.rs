//! PostgreSQL implementation of blocklist repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::BlocklistRepository;
use crate::error::AppError;

/// A blocklisted identity as listed by the admin CLI.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlocklistEntry {
    pub value: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// PostgreSQL repository for the `blocklist` set.
///
/// The click path only calls [`BlocklistRepository::is_blocked`]; the
/// inherent methods back the admin CLI.
pub struct PgBlocklistRepository {
    pool: Arc<PgPool>,
}

impl PgBlocklistRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Adds a value. Returns `false` if it was already present.
    pub async fn add(&self, value: &str, reason: Option<&str>) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO blocklist (value, reason)
            VALUES ($1, $2)
            ON CONFLICT (value) DO NOTHING
            "#,
        )
        .bind(value)
        .bind(reason)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes a value. Returns `false` if it was not present.
    pub async fn remove(&self, value: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blocklist WHERE value = $1")
            .bind(value)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all entries, newest first.
    pub async fn list(&self) -> Result<Vec<BlocklistEntry>, AppError> {
        let rows = sqlx::query_as::<_, BlocklistEntry>(
            r#"
            SELECT value, reason, created_at
            FROM blocklist
            ORDER BY created_at DESC, value
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl BlocklistRepository for PgBlocklistRepository {
    async fn is_blocked(&self, value: &str) -> Result<bool, AppError> {
        let blocked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM blocklist WHERE value = $1)",
        )
        .bind(value)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(blocked)
    }
}
