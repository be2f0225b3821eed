//! Handlers shared by every catalog kind.
//!
//! Generic over the entity, so they are mounted once per kind by
//! [`routes`](crate::features::catalog::routes::routes). Their OpenAPI entries
//! are added per kind in `core::openapi`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::guards::RequireAdmin;
use crate::features::catalog::models::CatalogEntity;
use crate::features::catalog::services::CatalogService;
use crate::shared::types::{ApiResponse, DeletedDto, Meta};

/// List every entry of one kind, with `meta.total`
pub async fn list_entries<T: CatalogEntity>(
    State(service): State<Arc<CatalogService<T>>>,
) -> Result<Json<ApiResponse<Vec<T>>>> {
    let entries = service.list().await?;
    let total = entries.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(entries),
        None,
        Some(Meta { total }),
    )))
}

/// Get one entry by id
pub async fn get_entry<T: CatalogEntity>(
    State(service): State<Arc<CatalogService<T>>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<T>>> {
    let entry = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(entry), None, None)))
}

/// Create an entry (admin)
pub async fn create_entry<T: CatalogEntity>(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CatalogService<T>>>,
    AppJson(input): AppJson<T::Input>,
) -> Result<(StatusCode, Json<ApiResponse<T>>)> {
    tracing::debug!(sub = %user.sub, kind = T::KIND.label(), "Creating catalog entry");
    let entry = service.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(entry),
            Some(format!("{} created", T::KIND.label())),
            None,
        )),
    ))
}

/// Replace every writable field of an entry (admin)
pub async fn update_entry<T: CatalogEntity>(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CatalogService<T>>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<T::Input>,
) -> Result<Json<ApiResponse<T>>> {
    tracing::debug!(sub = %user.sub, kind = T::KIND.label(), %id, "Updating catalog entry");
    let entry = service.update(id, input).await?;

    Ok(Json(ApiResponse::success(
        Some(entry),
        Some(format!("{} updated", T::KIND.label())),
        None,
    )))
}

/// Delete an entry (admin). 409 while a tour package still references it.
pub async fn delete_entry<T: CatalogEntity>(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CatalogService<T>>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<DeletedDto>>> {
    tracing::debug!(sub = %user.sub, kind = T::KIND.label(), %id, "Deleting catalog entry");
    service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeletedDto { deleted: true, id }),
        Some(format!("{} deleted", T::KIND.label())),
        None,
    )))
}
