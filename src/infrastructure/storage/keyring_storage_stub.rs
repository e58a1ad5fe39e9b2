//! Stub keyring storage for builds without keyring support.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::{AccessToken, RefreshToken};
use crate::domain::errors::{AuthError, StorageError};
use crate::domain::ports::TokenStoragePort;

/// Keyring storage placeholder used when the `keyring` feature is disabled.
///
/// Reads find nothing; writes fail so the session knows it will not survive a restart.
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn with_service(_service: impl Into<String>) -> Self {
        Self
    }

    fn unavailable() -> AuthError {
        StorageError::NotAvailable("built without the keyring feature".to_string()).into()
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_access_token(&self) -> Result<Option<AccessToken>, AuthError> {
        debug!("Keyring feature disabled - no stored access token");
        Ok(None)
    }

    async fn get_refresh_token(&self) -> Result<Option<RefreshToken>, AuthError> {
        Ok(None)
    }

    async fn store_access_token(&self, _token: &AccessToken) -> Result<(), AuthError> {
        Err(Self::unavailable())
    }

    async fn store_refresh_token(&self, _token: &RefreshToken) -> Result<(), AuthError> {
        Err(Self::unavailable())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        Ok(())
    }
}
