use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::tour_packages::dtos::{
    CreateTourPackageDto, GetTourPackageQuery, ListTourPackagesQuery, TourPackageResponseDto,
    UpdateTourPackageDto,
};
use crate::features::tour_packages::services::TourPackageService;
use crate::shared::types::{ApiResponse, DeletedDto, Meta};

/// List tour packages
///
/// Newest first. References are resolved unless `populate=false`.
#[utoipa::path(
    get,
    path = "/api/tour-packages",
    params(
        ("status" = Option<String>, Query, description = "Filter by package status"),
        ("kategori" = Option<Uuid>, Query, description = "Filter by package category id"),
        ("populate" = Option<bool>, Query, description = "Resolve references (default true)")
    ),
    responses(
        (status = 200, description = "List of tour packages", body = ApiResponse<Vec<TourPackageResponseDto>>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "tour-packages"
)]
pub async fn list_tour_packages(
    State(service): State<Arc<TourPackageService>>,
    AppQuery(query): AppQuery<ListTourPackagesQuery>,
) -> Result<Json<ApiResponse<Vec<TourPackageResponseDto>>>> {
    let packages = service.list(&query).await?;
    let total = packages.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(packages),
        None,
        Some(Meta { total }),
    )))
}

/// Get a tour package by id
#[utoipa::path(
    get,
    path = "/api/tour-packages/{id}",
    params(
        ("id" = Uuid, Path, description = "Tour package id"),
        ("populate" = Option<bool>, Query, description = "Resolve references (default true)")
    ),
    responses(
        (status = 200, description = "Tour package found", body = ApiResponse<TourPackageResponseDto>),
        (status = 404, description = "Tour package not found")
    ),
    tag = "tour-packages"
)]
pub async fn get_tour_package(
    State(service): State<Arc<TourPackageService>>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<GetTourPackageQuery>,
) -> Result<Json<ApiResponse<TourPackageResponseDto>>> {
    let package = service.get(id, query.populate).await?;
    Ok(Json(ApiResponse::success(Some(package), None, None)))
}

/// Create a tour package
#[utoipa::path(
    post,
    path = "/api/tour-packages",
    request_body = CreateTourPackageDto,
    responses(
        (status = 201, description = "Tour package created", body = ApiResponse<TourPackageResponseDto>),
        (status = 400, description = "Validation failed; see fieldErrors"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or staff access required")
    ),
    security(("bearer_auth" = [])),
    tag = "tour-packages"
)]
pub async fn create_tour_package(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<TourPackageService>>,
    AppJson(dto): AppJson<CreateTourPackageDto>,
) -> Result<(StatusCode, Json<ApiResponse<TourPackageResponseDto>>)> {
    tracing::debug!(sub = %user.sub, "Creating tour package");
    let package = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(package),
            Some("Tour package created".to_string()),
            None,
        )),
    ))
}

/// Update a tour package
///
/// Serves both PUT and PATCH. Absent fields keep their stored value.
#[utoipa::path(
    put,
    path = "/api/tour-packages/{id}",
    params(("id" = Uuid, Path, description = "Tour package id")),
    request_body = UpdateTourPackageDto,
    responses(
        (status = 200, description = "Tour package updated", body = ApiResponse<TourPackageResponseDto>),
        (status = 400, description = "Validation failed; see fieldErrors"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or staff access required"),
        (status = 404, description = "Tour package not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tour-packages"
)]
pub async fn update_tour_package(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<TourPackageService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateTourPackageDto>,
) -> Result<Json<ApiResponse<TourPackageResponseDto>>> {
    tracing::debug!(sub = %user.sub, %id, "Updating tour package");
    let package = service.update(id, dto).await?;

    Ok(Json(ApiResponse::success(
        Some(package),
        Some("Tour package updated".to_string()),
        None,
    )))
}

/// Delete a tour package
#[utoipa::path(
    delete,
    path = "/api/tour-packages/{id}",
    params(("id" = Uuid, Path, description = "Tour package id")),
    responses(
        (status = 200, description = "Tour package deleted", body = ApiResponse<DeletedDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or staff access required"),
        (status = 404, description = "Tour package not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tour-packages"
)]
pub async fn delete_tour_package(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<TourPackageService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<DeletedDto>>> {
    tracing::debug!(sub = %user.sub, %id, "Deleting tour package");
    service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeletedDto { deleted: true, id }),
        Some("Tour package deleted".to_string()),
        None,
    )))
}
