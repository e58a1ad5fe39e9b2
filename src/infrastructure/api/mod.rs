//! Backend token endpoint adapter.

mod auth_client;
mod dto;

pub use auth_client::ApiAuthClient;
