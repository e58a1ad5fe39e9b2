//! Durable token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::{AccessToken, RefreshToken};
use crate::domain::errors::AuthError;

/// Fixed storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Fixed storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Port for token persistence operations.
///
/// Storage mirrors the in-memory session; absent entries mean logged out.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored access token.
    async fn get_access_token(&self) -> Result<Option<AccessToken>, AuthError>;

    /// Retrieves stored refresh token.
    async fn get_refresh_token(&self) -> Result<Option<RefreshToken>, AuthError>;

    /// Stores access token.
    async fn store_access_token(&self, token: &AccessToken) -> Result<(), AuthError>;

    /// Stores refresh token.
    async fn store_refresh_token(&self, token: &RefreshToken) -> Result<(), AuthError>;

    /// Deletes both entries.
    async fn clear(&self) -> Result<(), AuthError>;

    /// Checks if an access token exists.
    async fn has_token(&self) -> Result<bool, AuthError> {
        Ok(self.get_access_token().await?.is_some())
    }
}
