//! Token endpoint port definition.

use async_trait::async_trait;

use crate::domain::entities::{AccessToken, RefreshToken, TokenPair};
use crate::domain::errors::AuthError;

/// Result of exchanging a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewedTokens {
    /// Fresh access token.
    pub access: AccessToken,
    /// Rotated refresh token, when the backend rotates them.
    pub refresh: Option<RefreshToken>,
}

impl RenewedTokens {
    /// Creates renewal result without rotation.
    #[must_use]
    pub const fn new(access: AccessToken) -> Self {
        Self {
            access,
            refresh: None,
        }
    }
}

/// Port for the backend's token-issuing endpoints.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges username and password for a token pair.
    async fn obtain_tokens(&self, username: &str, password: &str)
    -> Result<TokenPair, AuthError>;

    /// Exchanges a refresh token for a new access token.
    async fn refresh(&self, refresh: &RefreshToken) -> Result<RenewedTokens, AuthError>;
}
