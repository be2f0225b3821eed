use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{
    get_extension_from_content_type, is_mime_type_allowed, is_valid_purpose, FileResponseDto,
    DEFAULT_PURPOSE,
};
use crate::modules::storage::LocalStorage;
use crate::shared::constants::ALLOWED_IMAGE_TYPES;

/// Service for image uploads
pub struct FileService {
    storage: Arc<LocalStorage>,
    max_upload_size: usize,
}

impl FileService {
    pub fn new(storage: Arc<LocalStorage>, max_upload_size: usize) -> Self {
        Self {
            storage,
            max_upload_size,
        }
    }

    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    /// Validate and store an uploaded image
    pub async fn upload_file(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
        purpose: Option<String>,
        uploaded_by: &str,
    ) -> Result<FileResponseDto> {
        if data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }

        if data.len() > self.max_upload_size {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                self.max_upload_size,
                self.max_upload_size / 1024 / 1024
            )));
        }

        if !is_mime_type_allowed(content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        let purpose = purpose.unwrap_or_else(|| DEFAULT_PURPOSE.to_string());
        if !is_valid_purpose(&purpose) {
            return Err(AppError::BadRequest(format!(
                "Invalid purpose '{}': use lowercase letters, digits, '-' or '_'",
                purpose
            )));
        }

        let extension = get_extension_from_content_type(content_type).unwrap_or("bin");
        let key = self.storage.generate_key(&purpose, extension);
        self.storage.save(&key, &data).await?;

        let url = self.storage.url_for(&key);
        info!(
            "File uploaded: key={}, size={}, by={}",
            key,
            data.len(),
            uploaded_by
        );

        Ok(FileResponseDto {
            key,
            url,
            original_filename: original_filename.to_string(),
            content_type: content_type.to_string(),
            file_size: data.len() as i64,
            purpose,
            uploaded_at: Utc::now(),
        })
    }

    /// Delete a file by the URL the upload returned
    pub async fn delete_by_url(&self, url: &str, deleted_by: &str) -> Result<()> {
        let key = self
            .storage
            .key_from_url(url)
            .ok_or_else(|| AppError::BadRequest(format!("'{}' is not an uploaded file URL", url)))?;

        self.storage.delete(&key).await?;
        info!("File deleted: key={}, by={}", key, deleted_by);

        Ok(())
    }
}
