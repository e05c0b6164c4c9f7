//! Storage-facing error type shared by repositories and services.
//!
//! Nothing in the click path turns an [`AppError`] into a client-visible
//! response: resolution errors become the "not available" page, fraud check
//! errors fail open, and persistence errors are logged by the click worker.

/// Errors produced by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
