use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::catalog::handlers;
use crate::features::catalog::models::CatalogEntity;
use crate::features::catalog::services::CatalogService;

/// Routes for one catalog kind under `/api/{kind}`.
///
/// Reads are public; writes require an admin or staff principal.
pub fn routes<T: CatalogEntity>(service: Arc<CatalogService<T>>) -> Router {
    let collection = format!("/api/{}", T::KIND.path_segment());
    let item = format!("{}/{{id}}", collection);

    Router::new()
        .route(
            &collection,
            get(handlers::list_entries::<T>).post(handlers::create_entry::<T>),
        )
        .route(
            &item,
            get(handlers::get_entry::<T>)
                .put(handlers::update_entry::<T>)
                .delete(handlers::delete_entry::<T>),
        )
        .with_state(service)
}
