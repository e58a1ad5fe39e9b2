use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// Reads `config.toml`, seeding it with defaults on first run.
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager over the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::with_dir)
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    #[must_use]
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads the configuration from `path_override` or the default location.
    ///
    /// A missing file is created with defaults. A file that fails to parse is
    /// left untouched and defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );

        if !path.exists() {
            return Self::seed_default(&path);
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str::<AppConfig>(&content).or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
            Ok(AppConfig::default())
        })
    }

    fn seed_default(path: &Path) -> Result<AppConfig, ConfigError> {
        info!(path = %path.display(), "Config file not found, writing defaults");
        let config = AppConfig::default();
        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("config path has no parent"))?;
        fs::create_dir_all(parent)?;

        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        staged.write_all(toml::to_string_pretty(&config)?.as_bytes())?;
        staged.persist(path).map_err(|e| e.error)?;
        debug!(path = %path.display(), "Default config written");

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_written_into_missing_directory() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().join("datum"));

        manager.load_config(None).unwrap();

        assert!(manager.config_dir().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_load_config_creates_default_if_missing() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf());

        let config = manager.load_config(None).unwrap();
        assert_eq!(config, AppConfig::default());

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("base_url = \"http://127.0.0.1:8000\""));
    }

    #[test]
    fn test_load_config_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_file, "[api\nbase_url = ").unwrap();

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.api.version, "v1");
        let content = fs::read_to_string(&config_file).unwrap();
        assert_eq!(content, "[api\nbase_url = ");
    }

    #[test]
    fn test_load_config_from_override_path() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[api]\ntimeout_secs = 5\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();

        assert_eq!(config.api.timeout_secs, 5);
    }
}
