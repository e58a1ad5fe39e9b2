//! Keyring-based token storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::{AccessToken, RefreshToken};
use crate::domain::errors::{AuthError, StorageError};
use crate::domain::ports::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStoragePort};

const KEYRING_SERVICE: &str = "datum";

/// System keyring token storage adapter.
///
/// Each token lives in its own entry under one service name.
pub struct KeyringTokenStorage {
    service: String,
}

impl KeyringTokenStorage {
    /// Creates new storage with the default service name.
    #[must_use]
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    /// Creates storage under a custom service name.
    #[must_use]
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Entry::new(&self.service, key)
            .map_err(|e| StorageError::AccessFailed(format!("failed to access keyring: {e}")))
    }

    fn read(&self, key: &str) -> Result<Option<String>, AuthError> {
        debug!(service = %self.service, key, "Reading keyring entry");

        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => {
                debug!(key, "No keyring entry");
                Ok(None)
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read keyring entry");
                Err(StorageError::RetrievalFailed(e.to_string()).into())
            }
        }
    }

    fn write(&self, key: &str, secret: &str) -> Result<(), AuthError> {
        debug!(service = %self.service, key, "Writing keyring entry");

        self.entry(key)?.set_password(secret).map_err(|e| {
            warn!(key, error = %e, "Failed to write keyring entry");
            AuthError::from(StorageError::StorageFailed(e.to_string()))
        })
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(key, error = %e, "Failed to delete keyring entry");
                Err(StorageError::DeletionFailed(e.to_string()).into())
            }
        }
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
        Ok(self.read(ACCESS_TOKEN_KEY)?.and_then(AccessToken::new))
    }

    async fn get_refresh_token(&self) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self.read(REFRESH_TOKEN_KEY)?.and_then(RefreshToken::new))
    }

    async fn store_access_token(&self, token: &AccessToken) -> Result<(), AuthError> {
        self.write(ACCESS_TOKEN_KEY, token.as_str())
    }

    async fn store_refresh_token(&self, token: &RefreshToken) -> Result<(), AuthError> {
        self.write(REFRESH_TOKEN_KEY, token.as_str())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        debug!(service = %self.service, "Clearing keyring entries");
        let access = self.remove(ACCESS_TOKEN_KEY);
        let refresh = self.remove(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires system keyring"]
    async fn test_store_and_clear_pair() {
        let storage = KeyringTokenStorage::with_service("datum-test");
        let access = AccessToken::new_unchecked("eyJhbGciOiJIUzI1NiJ9.e30.sig");
        let refresh = RefreshToken::new_unchecked("refresh-value");

        storage.store_access_token(&access).await.unwrap();
        storage.store_refresh_token(&refresh).await.unwrap();

        assert_eq!(storage.get_access_token().await.unwrap(), Some(access));
        assert_eq!(storage.get_refresh_token().await.unwrap(), Some(refresh));

        storage.clear().await.unwrap();
        assert!(!storage.has_token().await.unwrap());
    }
}
