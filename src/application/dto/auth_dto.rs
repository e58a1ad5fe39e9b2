//! Authentication DTOs.

use crate::domain::SessionUser;

/// Result of a login attempt as shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Whether the session was established.
    pub success: bool,
    /// Failure message for display.
    pub message: Option<String>,
    /// Signed-in user when claims could be decoded.
    pub user: Option<SessionUser>,
}

impl LoginOutcome {
    /// Creates successful outcome.
    #[must_use]
    pub const fn succeeded(user: Option<SessionUser>) -> Self {
        Self {
            success: true,
            message: None,
            user,
        }
    }

    /// Creates failed outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            user: None,
        }
    }
}
