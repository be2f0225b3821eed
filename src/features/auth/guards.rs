//! Authorization guards for the back-office write surface.
//!
//! Reads of packages and catalog entries are public. Every write goes through
//! [`RequireAdmin`], which needs a principal attached by the auth middleware.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for content management (admin or staff role).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        if !user.can_manage_content() {
            return Err(AppError::Forbidden(
                "Admin or staff access required".to_string(),
            ));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
