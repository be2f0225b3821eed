// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Back-office administrator - can manage packages, catalog entities and uploads
pub const ROLE_ADMIN: &str = "admin";

/// Back-office staff - same write access as admin for content management
pub const ROLE_STAFF: &str = "staff";

// =============================================================================
// UPLOADS
// =============================================================================

/// Image MIME types accepted by the upload endpoint
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
