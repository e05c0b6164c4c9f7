//! Repository trait for identity blocklist membership.

use crate::error::AppError;
use async_trait::async_trait;

/// Membership queries against the persisted blocklist set.
///
/// The set holds arbitrary identity strings (user ids, advertising ids)
/// without a type tag, so one lookup serves every identity class.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlocklistRepository: Send + Sync {
    /// Returns true if `value` is present in the blocklist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn is_blocked(&self, value: &str) -> Result<bool, AppError>;
}
