use serde::{Deserialize, Serialize};

/// Body of the token-obtain request.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of the token-refresh request.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Token pair issued on login.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
}

/// Refresh result; `refresh` is present only when the backend rotates it.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Error body of the token endpoints.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub detail: Option<String>,
}
