use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::AuthenticatedUser;

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseDto {
    pub sub: String,
    pub name: Option<String>,
    pub roles: Vec<String>,
    pub can_manage_content: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        let can_manage_content = user.can_manage_content();
        Self {
            sub: user.sub,
            name: user.name,
            roles: user.roles,
            can_manage_content,
        }
    }
}
