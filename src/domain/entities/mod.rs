//! Domain entity definitions.

mod resource;
pub mod resources;
mod session_user;
mod token;

pub use resource::{AcceptsMultipart, Activatable, Endpoint, Resource, ResourceId, ResourceKind};
pub use resources::Record;
pub use session_user::{SessionUser, TokenClaims};
pub use token::{AccessToken, RefreshToken, TokenPair};

#[cfg(test)]
pub(crate) use session_user::fixtures;
