//! Resource API error types.

use serde_json::Value;
use thiserror::Error;

const UNAUTHORIZED_DETAIL: &str = "authentication credentials were not provided or are invalid";

/// Failure of a call to the resource API.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// No response was received.
    #[error("network error: {message}")]
    Transport { message: String },

    /// HTTP 401.
    #[error("unauthorized: {detail}")]
    Unauthorized { detail: String },

    /// 4xx with a structured body.
    #[error("request rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: u16,
        detail: Option<String>,
        body: Value,
    },

    /// 5xx.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ApiError {
    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Classifies a non-success response.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let body: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let detail = body
            .get("detail")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        match status {
            401 => Self::Unauthorized {
                detail: detail.unwrap_or_else(|| UNAUTHORIZED_DETAIL.to_string()),
            },
            500..=599 => Self::Server {
                status,
                message: detail.unwrap_or_else(|| format!("HTTP {status}")),
            },
            _ => Self::Rejected {
                status,
                detail,
                body,
            },
        }
    }

    /// Returns the HTTP status when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Rejected { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether this is an authorization failure.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns the human-readable message kept for passive display.
    ///
    /// Prefers the server `detail`, then a validation body, then the error itself.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message } => message.clone(),
            Self::Unauthorized { detail } => detail.clone(),
            Self::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Rejected { body, .. } if !body.is_null() => body.to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(401, Some(401) ; "unauthorized")]
    #[test_case(400, Some(400) ; "bad request")]
    #[test_case(404, Some(404) ; "not found")]
    #[test_case(503, Some(503) ; "unavailable")]
    fn test_status_preserved(status: u16, expected: Option<u16>) {
        assert_eq!(ApiError::from_response(status, b"").status(), expected);
    }

    #[test]
    fn test_unauthorized_classification() {
        let err = ApiError::from_response(401, br#"{"detail":"Token is invalid or expired"}"#);

        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Token is invalid or expired");
    }

    #[test]
    fn test_validation_body_used_without_detail() {
        let err = ApiError::from_response(400, br#"{"name":["This field is required."]}"#);

        assert!(!err.is_unauthorized());
        assert_eq!(
            err.user_message(),
            json!({"name": ["This field is required."]}).to_string()
        );
    }

    #[test]
    fn test_server_error_is_opaque() {
        let err = ApiError::from_response(500, b"<html>oops</html>");

        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(err.user_message(), "server error 500: HTTP 500");
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = ApiError::transport("connection refused");

        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "connection refused");
    }
}
