//! Repository trait for campaign lookups.

use crate::domain::entities::Campaign;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Read-only access to campaigns keyed by tracking link.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCampaignRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Finds the campaign bound to a link identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Campaign))` if a campaign is bound to the link
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn find_by_link_id(&self, link_id: Uuid) -> Result<Option<Campaign>, AppError>;

    /// Round-trips to storage. Used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
