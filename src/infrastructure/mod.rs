//! Infrastructure layer with external service adapters.

/// Backend token endpoint client.
pub mod api;
/// Application configuration.
pub mod config;
/// HTTP transport.
pub mod http;
/// Token storage adapters.
pub mod storage;

pub use api::ApiAuthClient;
pub use config::{AppConfig, CliArgs, Command, ConfigError, ConfigManager, LogLevel};
pub use http::ReqwestTransport;
pub use storage::{FileTokenStorage, KeyringTokenStorage};
