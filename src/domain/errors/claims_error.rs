//! Access token claim decoding errors.

use thiserror::Error;

/// Reasons a token payload could not be read.
#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token payload is not base64url: {0}")]
    Encoding(String),

    #[error("token payload is not a JSON object: {0}")]
    Payload(String),
}
