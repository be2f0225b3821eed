//! Local-disk file storage
//!
//! Keys are relative paths of the form `{purpose}/{uuid}.{ext}`. The public URL
//! of a key is `{public_path}/{key}`.

use std::path::{Component, Path, PathBuf};

use reqwest::Url;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

pub struct LocalStorage {
    root: PathBuf,
    public_path: String,
}

impl LocalStorage {
    pub fn new(root: PathBuf, public_path: impl Into<String>) -> Self {
        Self {
            root,
            public_path: public_path.into(),
        }
    }

    /// Storage for `config`, making sure the upload directory exists
    pub async fn init(config: &StorageConfig) -> Result<Self, AppError> {
        fs::create_dir_all(&config.upload_dir).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory {}: {}",
                config.upload_dir.display(),
                e
            ))
        })?;

        info!(
            "Local storage initialized at {} (served under {})",
            config.upload_dir.display(),
            config.public_path
        );

        Ok(Self::new(config.upload_dir.clone(), config.public_path.clone()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL path the root is served under
    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    /// Fresh key for a file of the given purpose
    pub fn generate_key(&self, purpose: &str, extension: &str) -> String {
        format!("{}/{}.{}", purpose, Uuid::now_v7(), extension)
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_path, key)
    }

    /// Key for a URL produced by [`url_for`](Self::url_for). Absolute URLs are
    /// accepted as long as their path is under the public path.
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        let path = match Url::parse(url) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => url.to_string(),
        };

        let key = path
            .strip_prefix(&self.public_path)?
            .strip_prefix('/')?
            .to_string();

        is_safe_key(&key).then_some(key)
    }

    pub async fn save(&self, key: &str, data: &[u8]) -> Result<(), AppError> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {}", e)))?;

        debug!("Stored {} bytes at {}", data.len(), path.display());
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(AppError::Internal(format!("Failed to delete file: {}", e))),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        if !is_safe_key(key) {
            return Err(AppError::BadRequest(format!("Invalid file key '{}'", key)));
        }
        Ok(self.root.join(key))
    }
}

/// Relative, non-empty, and free of `..` or root components
fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && Path::new(key)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}
