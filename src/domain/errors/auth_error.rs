//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("credentials rejected: {message}")]
    InvalidCredentials { message: String },

    #[error("no authentication token available")]
    NoTokenAvailable,

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("unexpected response from token endpoint: {message}")]
    InvalidResponse { message: String },

    #[error("token endpoint failed with HTTP {status}")]
    ServerError {
        status: u16,
        detail: Option<String>,
    },

    #[error("token storage error: {0}")]
    Storage(#[from] super::StorageError),

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates invalid credentials error.
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates server failure error.
    #[must_use]
    pub const fn server(status: u16, detail: Option<String>) -> Self {
        Self::ServerError { status, detail }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the message shown to a user after a failed login.
    #[must_use]
    pub fn login_message(&self) -> String {
        match self {
            Self::InvalidCredentials { message } => message.clone(),
            Self::ServerError {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => "Login failed".to_string(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}
