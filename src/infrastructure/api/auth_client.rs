//! Client for the backend's token endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::dto::{ErrorResponse, RefreshRequest, RefreshResponse, TokenRequest, TokenResponse};
use crate::domain::entities::{AccessToken, RefreshToken, TokenPair};
use crate::domain::errors::{ApiError, AuthError};
use crate::domain::ports::{ApiRequest, ApiResponse, AuthPort, HttpTransport, Method, RenewedTokens};

const TOKEN_PATH: &str = "/api/auth/token/";
const REFRESH_PATH: &str = "/api/auth/token/refresh/";
const LOGIN_FAILED: &str = "Login failed";

/// Token endpoint client.
///
/// Talks to the transport directly so that a failing refresh never passes
/// through the renew-on-401 pipeline.
pub struct ApiAuthClient {
    transport: Arc<dyn HttpTransport>,
}

impl ApiAuthClient {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, AuthError> {
        let request = ApiRequest::new(Method::Post, path)
            .with_json(body)
            .map_err(|e| AuthError::unexpected(e.to_string()))?;

        self.transport.send(&request).await.map_err(|e| match e {
            ApiError::Transport { message } => {
                warn!(path, error = %message, "Token endpoint unreachable");
                AuthError::network(message)
            }
            other => AuthError::unexpected(other.to_string()),
        })
    }

    fn rejection(response: &ApiResponse) -> AuthError {
        let detail = serde_json::from_slice::<ErrorResponse>(&response.body)
            .ok()
            .and_then(|e| e.detail);

        if response.status >= 500 {
            AuthError::server(response.status, detail)
        } else {
            AuthError::invalid_credentials(detail.unwrap_or_else(|| LOGIN_FAILED.to_string()))
        }
    }
}

#[async_trait]
impl AuthPort for ApiAuthClient {
    async fn obtain_tokens(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        debug!(username, "Requesting token pair");

        let response = self
            .post(TOKEN_PATH, &TokenRequest { username, password })
            .await?;

        if !response.is_success() {
            let err = Self::rejection(&response);
            warn!(status = response.status, error = %err, "Token request rejected");
            return Err(err);
        }

        let tokens: TokenResponse = response.json().map_err(|e| {
            warn!(error = %e, "Failed to parse token response");
            AuthError::invalid_response(e.to_string())
        })?;

        let access = AccessToken::new(tokens.access)
            .ok_or_else(|| AuthError::invalid_response("empty access token"))?;
        let refresh = RefreshToken::new(tokens.refresh)
            .ok_or_else(|| AuthError::invalid_response("empty refresh token"))?;

        Ok(TokenPair::new(access, refresh))
    }

    async fn refresh(&self, refresh: &RefreshToken) -> Result<RenewedTokens, AuthError> {
        debug!("Requesting access token renewal");

        let response = self
            .post(
                REFRESH_PATH,
                &RefreshRequest {
                    refresh: refresh.as_str(),
                },
            )
            .await?;

        if !response.is_success() {
            let err = Self::rejection(&response);
            warn!(status = response.status, error = %err, "Refresh rejected");
            return Err(err);
        }

        let renewed: RefreshResponse = response
            .json()
            .map_err(|e| AuthError::invalid_response(e.to_string()))?;

        let access = AccessToken::new(renewed.access)
            .ok_or_else(|| AuthError::invalid_response("empty access token"))?;

        Ok(RenewedTokens {
            access,
            refresh: renewed.refresh.and_then(RefreshToken::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RequestBody;
    use crate::domain::ports::mocks::MockTransport;
    use serde_json::json;

    fn client(responses: Vec<Result<ApiResponse, ApiError>>) -> (ApiAuthClient, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::scripted(responses));
        (ApiAuthClient::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_obtain_tokens_posts_credentials() {
        let (client, transport) = client(vec![Ok(ApiResponse::json_body(
            200,
            &json!({"access": "a.b.c", "refresh": "r1"}),
        ))]);

        let pair = client.obtain_tokens("ops", "secret").await.unwrap();

        assert_eq!(pair.access.as_str(), "a.b.c");
        assert_eq!(pair.refresh.as_str(), "r1");
        let sent = transport.sent();
        assert_eq!(sent[0].path, "/api/auth/token/");
        assert_eq!(
            sent[0].body,
            RequestBody::Json(json!({"username": "ops", "password": "secret"}))
        );
        assert!(sent[0].header("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_rejection_carries_detail() {
        let (client, _) = client(vec![Ok(ApiResponse::json_body(
            401,
            &json!({"detail": "No active account found with the given credentials"}),
        ))]);

        let err = client.obtain_tokens("ops", "wrong").await.unwrap_err();

        assert_eq!(
            err.login_message(),
            "No active account found with the given credentials"
        );
    }

    #[tokio::test]
    async fn test_rejection_without_detail() {
        let (client, _) = client(vec![Ok(ApiResponse::json_body(
            400,
            &json!({"password": ["This field may not be blank."]}),
        ))]);

        let err = client.obtain_tokens("ops", "").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials { ref message } if message == "Login failed"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let (client, _) = client(vec![Err(ApiError::transport("request timed out"))]);

        let err = client.obtain_tokens("ops", "secret").await.unwrap_err();

        assert!(err.is_network_error());
    }

    #[tokio::test]
    async fn test_refresh_without_rotation() {
        let (client, transport) = client(vec![Ok(ApiResponse::json_body(
            200,
            &json!({"access": "new.access.token"}),
        ))]);

        let renewed = client
            .refresh(&RefreshToken::new_unchecked("r1"))
            .await
            .unwrap();

        assert_eq!(renewed.access.as_str(), "new.access.token");
        assert!(renewed.refresh.is_none());
        assert_eq!(transport.sent()[0].path, "/api/auth/token/refresh/");
    }

    #[tokio::test]
    async fn test_refresh_with_rotation() {
        let (client, _) = client(vec![Ok(ApiResponse::json_body(
            200,
            &json!({"access": "x.y.z", "refresh": "r2"}),
        ))]);

        let renewed = client
            .refresh(&RefreshToken::new_unchecked("r1"))
            .await
            .unwrap();

        assert_eq!(renewed.refresh.unwrap().as_str(), "r2");
    }

    #[tokio::test]
    async fn test_refresh_server_error() {
        let (client, _) = client(vec![Ok(ApiResponse::new(502, "bad gateway"))]);

        let err = client
            .refresh(&RefreshToken::new_unchecked("r1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::ServerError { status: 502, detail: None }));
    }

    #[tokio::test]
    async fn test_server_failure_keeps_detail() {
        let (client, _) = client(vec![Ok(ApiResponse::json_body(
            503,
            &json!({"detail": "Service temporarily unavailable"}),
        ))]);

        let err = client.obtain_tokens("ops", "secret").await.unwrap_err();

        assert_eq!(err.login_message(), "Service temporarily unavailable");
    }
}
