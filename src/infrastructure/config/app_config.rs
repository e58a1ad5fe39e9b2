//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;

const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "datum";
const APP_NAME: &str = "datum";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TOKEN_FILE_NAME: &str = "tokens.json";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where the token pair is persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// System keyring.
    #[default]
    Keyring,
    /// JSON file readable only by the owner.
    File,
}

/// Backend API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the backend, without the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Version segment of resource paths.
    #[serde(default = "default_api_version")]
    pub version: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: default_api_version(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Token storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Token file for the `file` backend; defaults to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path; logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Token storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(version) = &args.api_version {
            self.api.version.clone_from(version);
        }
        if let Some(timeout) = args.timeout_secs {
            self.api.timeout_secs = timeout;
        }
        if let Some(backend) = args.storage {
            self.storage.backend = backend;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default token file path.
    #[must_use]
    pub fn default_token_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join(TOKEN_FILE_NAME))
    }

    /// Returns effective token file path.
    #[must_use]
    pub fn effective_token_path(&self) -> Option<PathBuf> {
        self.storage.path.clone().or_else(Self::default_token_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [api]
            base_url = "https://datum.example.com"

            [storage]
            backend = "file"
            path = "/tmp/datum/tokens.json"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api.base_url, "https://datum.example.com");
        assert_eq!(config.api.version, "v1");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(
            config.effective_token_path(),
            Some(PathBuf::from("/tmp/datum/tokens.json"))
        );
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.storage.backend, StorageBackend::Keyring);
        assert!(config.log_path.is_none());
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config: AppConfig = toml::from_str("[api]\nversion = \"v1\"\n").unwrap();
        let args = CliArgs::parse_from([
            "datum",
            "--api-version",
            "v2",
            "--storage",
            "file",
            "--log-level",
            "warn",
            "status",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.api.version, "v2");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.log_level, LogLevel::Warn);
    }
}
