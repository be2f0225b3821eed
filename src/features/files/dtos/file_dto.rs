use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::constants::ALLOWED_IMAGE_TYPES;

/// Upload file request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The image to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Folder the image is grouped under, e.g. "hotels"
    #[schema(example = "hotels")]
    pub purpose: Option<String>,
}

/// Stored upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileResponseDto {
    /// Storage key, relative to the upload directory
    pub key: String,
    /// URL to store on the entity's `foto` field
    pub url: String,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub purpose: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeleteFileByUrlDto {
    /// URL returned by the upload endpoint
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponseDto {
    pub deleted: bool,
    pub url: String,
}

/// Purpose used when the upload names none
pub const DEFAULT_PURPOSE: &str = "general";

pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Lowercase letters, digits, `-` and `_`; at most 64 characters
pub fn is_valid_purpose(purpose: &str) -> bool {
    !purpose.is_empty()
        && purpose.len() <= 64
        && purpose
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_images_allowed() {
        assert!(is_mime_type_allowed("image/png"));
        assert!(is_mime_type_allowed("image/webp"));
        assert!(!is_mime_type_allowed("application/pdf"));
        assert!(!is_mime_type_allowed("image/svg+xml"));
    }

    #[test]
    fn test_every_allowed_type_has_extension() {
        for content_type in ALLOWED_IMAGE_TYPES {
            assert!(get_extension_from_content_type(content_type).is_some());
        }
    }

    #[test]
    fn test_purpose() {
        assert!(is_valid_purpose("hotels"));
        assert!(is_valid_purpose("tour_packages-2"));
        assert!(!is_valid_purpose(""));
        assert!(!is_valid_purpose("../etc"));
        assert!(!is_valid_purpose("Hotels"));
    }
}
