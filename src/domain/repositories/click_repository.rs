//! Repository trait for the append-only click log.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Duration;

/// Access to persisted click records.
///
/// Writes come only from the click worker; reads come from the origin
/// rate-limit fraud check.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors, including a
    /// duplicate `click_id` or an unknown campaign.
    async fn insert(&self, click: NewClick) -> Result<(), AppError>;

    /// Counts clicks recorded from `ip` within the trailing `window`.
    ///
    /// The window is measured against the storage clock, the same clock
    /// that stamps `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn count_by_ip_within(&self, ip: &str, window: Duration) -> Result<i64, AppError>;
}
