//! Token storage in a JSON file readable only by its owner.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::{AccessToken, RefreshToken};
use crate::domain::errors::{AuthError, StorageError};
use crate::domain::ports::TokenStoragePort;

/// On-disk layout; keys match the keyring entry names.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// File-backed token storage adapter.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<TokenFile, StorageError> {
        if !self.path.exists() {
            return Ok(TokenFile::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            StorageError::RetrievalFailed(format!("{}: {e}", self.path.display()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Token file is corrupt");
            StorageError::RetrievalFailed(format!("{}: {e}", self.path.display()))
        })
    }

    fn save(&self, tokens: &TokenFile) -> Result<(), StorageError> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| StorageError::AccessFailed("token path has no parent".to_string()))?;
        fs::create_dir_all(parent).map_err(|e| StorageError::AccessFailed(e.to_string()))?;

        let content = serde_json::to_string_pretty(tokens)
            .map_err(|e| StorageError::StorageFailed(e.to_string()))?;

        let mut temp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| StorageError::StorageFailed(e.to_string()))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| StorageError::StorageFailed(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o600))
                .map_err(|e| StorageError::StorageFailed(e.to_string()))?;
        }

        temp.persist(&self.path)
            .map_err(|e| StorageError::StorageFailed(e.error.to_string()))?;
        debug!(path = %self.path.display(), "Token file written");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut TokenFile)) -> Result<(), AuthError> {
        let mut tokens = self.load()?;
        apply(&mut tokens);
        Ok(self.save(&tokens)?)
    }
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn get_access_token(&self) -> Result<Option<AccessToken>, AuthError> {
        Ok(self.load()?.access_token.and_then(AccessToken::new))
    }

    async fn get_refresh_token(&self) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self.load()?.refresh_token.and_then(RefreshToken::new))
    }

    async fn store_access_token(&self, token: &AccessToken) -> Result<(), AuthError> {
        self.update(|tokens| tokens.access_token = Some(token.as_str().to_string()))
    }

    async fn store_refresh_token(&self, token: &RefreshToken) -> Result<(), AuthError> {
        self.update(|tokens| tokens.refresh_token = Some(token.as_str().to_string()))
    }

    async fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Token file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeletionFailed(e.to_string()).into()),
        }
    }
}
