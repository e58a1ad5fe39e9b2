//! Domain error types.

mod api_error;
mod auth_error;
mod claims_error;
mod storage_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use claims_error::ClaimsError;
pub use storage_error::StorageError;
