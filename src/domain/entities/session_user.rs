//! Identity of the signed-in user, derived from access token claims.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccessToken, ResourceId};
use crate::domain::errors::ClaimsError;

/// JWT segments are base64url; some issuers keep the padding.
const JWT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const FALLBACK_USERNAME: &str = "User";

#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    user_id: Option<ResourceId>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Claims read from an access token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// `user_id` claim.
    pub user_id: Option<ResourceId>,
    /// `username` claim.
    pub username: Option<String>,
    /// `exp` claim.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
    /// Decodes the payload segment of a JWT without verifying its signature.
    ///
    /// # Errors
    /// Returns error if the token is not a three-part JWT or the payload is not JSON.
    pub fn decode(token: &AccessToken) -> Result<Self, ClaimsError> {
        let mut segments = token.as_str().split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
            _ => return Err(ClaimsError::Malformed),
        };

        let bytes = JWT_ENGINE
            .decode(payload)
            .map_err(|e| ClaimsError::Encoding(e.to_string()))?;
        let raw: RawClaims =
            serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Payload(e.to_string()))?;

        Ok(Self {
            user_id: raw.user_id,
            username: raw.username,
            expires_at: raw.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)),
        })
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    id: Option<ResourceId>,
    username: String,
}

impl SessionUser {
    /// Creates new session user.
    #[must_use]
    pub fn new(id: Option<ResourceId>, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Builds the user from decoded claims.
    #[must_use]
    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self {
            id: claims.user_id.clone(),
            username: claims
                .username
                .clone()
                .unwrap_or_else(|| FALLBACK_USERNAME.to_string()),
        }
    }

    /// Returns user id.
    #[must_use]
    pub const fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    /// Returns username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    /// Builds an unsigned JWT carrying the given JSON payload.
    pub fn jwt(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::jwt;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_claims() {
        let token = AccessToken::new_unchecked(jwt(
            &json!({"user_id": 7, "username": "alice", "exp": 1_700_000_000}),
        ));

        let claims = TokenClaims::decode(&token).unwrap();

        assert_eq!(claims.user_id, Some(ResourceId::Int(7)));
        assert_eq!(claims.username.as_deref(), Some("alice"));
        assert_eq!(
            claims.expires_at.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_missing_username_falls_back() {
        let token = AccessToken::new_unchecked(jwt(&json!({"user_id": 1})));

        let user = SessionUser::from_claims(&TokenClaims::decode(&token).unwrap());

        assert_eq!(user.username(), "User");
        assert_eq!(user.id(), Some(&ResourceId::Int(1)));
    }

    #[test]
    fn test_padded_payload_accepted() {
        let token = AccessToken::new_unchecked("a.eyJ1c2VyX2lkIjoxfQ==.c");
        assert!(TokenClaims::decode(&token).is_ok());
    }

    #[test]
    fn test_opaque_token_is_malformed() {
        let token = AccessToken::new_unchecked("not-a-jwt");
        assert!(matches!(
            TokenClaims::decode(&token),
            Err(ClaimsError::Malformed)
        ));
    }

    #[test]
    fn test_non_json_payload_rejected() {
        let token = AccessToken::new_unchecked("a.bm90IGpzb24.c");
        assert!(matches!(
            TokenClaims::decode(&token),
            Err(ClaimsError::Payload(_))
        ));
    }
}
