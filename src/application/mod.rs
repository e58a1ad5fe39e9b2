//! Application layer: session lifecycle, request pipeline and resource stores.

/// Data transfer objects.
pub mod dto;
/// Credential-attaching request pipeline.
pub mod pipeline;
/// Session lifecycle.
pub mod session;
/// Cached resource stores.
pub mod stores;

pub use dto::LoginOutcome;
pub use pipeline::RequestPipeline;
pub use session::CredentialStore;
pub use stores::{ListQuery, ResourceStore, ResourceStores};
