use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::validate_not_blank;

/// Create/replace payload for a destination
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DestinationInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub nama: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub lokasi: String,
    #[serde(default)]
    pub deskripsi: String,
    /// URL returned by the upload endpoint
    #[validate(length(max = 512, message = "foto URL is too long"))]
    pub foto: Option<String>,
}

/// Create/replace payload for a hotel
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub nama: String,
    #[serde(default)]
    pub alamat: String,
    #[validate(range(min = 1, max = 5, message = "bintang must be between 1 and 5"))]
    pub bintang: i16,
    pub deskripsi: Option<String>,
    #[validate(length(max = 512, message = "foto URL is too long"))]
    pub foto: Option<String>,
}

/// Create/replace payload for a fleet vehicle
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArmadaInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub nama: String,
    #[validate(range(min = 1, message = "kapasitas must be at least 1"))]
    pub kapasitas: i32,
    pub deskripsi: Option<String>,
    #[validate(length(max = 512, message = "foto URL is too long"))]
    pub foto: Option<String>,
}

/// Create/replace payload for a consumption (meal) plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub nama: String,
    pub deskripsi: Option<String>,
}

/// Create/replace payload for a package category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageCategoryInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub nama: String,
    pub deskripsi: Option<String>,
}
