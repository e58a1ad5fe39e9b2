//! Durable token storage error types.

use thiserror::Error;

/// Token storage error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access token storage: {0}")]
    AccessFailed(String),

    #[error("failed to read token: {0}")]
    RetrievalFailed(String),

    #[error("failed to store token: {0}")]
    StorageFailed(String),

    #[error("failed to delete token: {0}")]
    DeletionFailed(String),

    #[error("token storage not available: {0}")]
    NotAvailable(String),
}
