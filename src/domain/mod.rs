//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{AccessToken, RefreshToken, Resource, ResourceId, SessionUser, TokenPair};
pub use errors::{ApiError, AuthError};
pub use ports::{AuthPort, HttpTransport, NavigationPort, TokenStoragePort};
