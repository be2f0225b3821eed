//! Service graph and router assembly shared by the binary and the tests.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::{self, JwtValidator};
use crate::features::catalog::{
    self,
    models::{Armada, Consumption, Destination, Hotel, PackageCategory},
    repositories::PgCatalogRepository,
    services::CatalogService,
};
use crate::features::files::{self, FileService};
use crate::features::tour_packages::{
    self,
    repositories::{PgTourPackageRepository, TourPackageRepository},
    services::{CatalogRepositories, TourPackageService},
};
use crate::modules::storage::LocalStorage;

/// Every service the HTTP surface needs
#[derive(Clone)]
pub struct AppServices {
    pub tour_packages: Arc<TourPackageService>,
    pub destinations: Arc<CatalogService<Destination>>,
    pub hotels: Arc<CatalogService<Hotel>>,
    pub armadas: Arc<CatalogService<Armada>>,
    pub consumptions: Arc<CatalogService<Consumption>>,
    pub categories: Arc<CatalogService<PackageCategory>>,
    pub files: Arc<FileService>,
    pub storage: Arc<LocalStorage>,
    pub jwt_validator: Arc<JwtValidator>,
}

impl AppServices {
    pub fn new(
        packages: Arc<dyn TourPackageRepository>,
        catalog: CatalogRepositories,
        storage: Arc<LocalStorage>,
        max_upload_size: usize,
        jwt_validator: Arc<JwtValidator>,
    ) -> Self {
        Self {
            destinations: Arc::new(CatalogService::new(
                catalog.destinations.clone(),
                packages.clone(),
            )),
            hotels: Arc::new(CatalogService::new(catalog.hotels.clone(), packages.clone())),
            armadas: Arc::new(CatalogService::new(catalog.armadas.clone(), packages.clone())),
            consumptions: Arc::new(CatalogService::new(
                catalog.consumptions.clone(),
                packages.clone(),
            )),
            categories: Arc::new(CatalogService::new(
                catalog.categories.clone(),
                packages.clone(),
            )),
            tour_packages: Arc::new(TourPackageService::new(packages, catalog)),
            files: Arc::new(FileService::new(storage.clone(), max_upload_size)),
            storage,
            jwt_validator,
        }
    }

    /// Postgres-backed services
    pub fn from_pool(
        pool: PgPool,
        storage: Arc<LocalStorage>,
        max_upload_size: usize,
        jwt_validator: Arc<JwtValidator>,
    ) -> Self {
        let catalog = CatalogRepositories {
            destinations: Arc::new(PgCatalogRepository::<Destination>::new(pool.clone())),
            hotels: Arc::new(PgCatalogRepository::<Hotel>::new(pool.clone())),
            armadas: Arc::new(PgCatalogRepository::<Armada>::new(pool.clone())),
            consumptions: Arc::new(PgCatalogRepository::<Consumption>::new(pool.clone())),
            categories: Arc::new(PgCatalogRepository::<PackageCategory>::new(pool.clone())),
        };
        let packages = Arc::new(PgTourPackageRepository::new(pool));

        Self::new(packages, catalog, storage, max_upload_size, jwt_validator)
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// API routes, static uploads and the health check, behind the auth middleware
pub fn api_routes(services: &AppServices) -> Router {
    Router::new()
        .merge(tour_packages::routes::routes(services.tour_packages.clone()))
        .merge(catalog::routes::routes(services.destinations.clone()))
        .merge(catalog::routes::routes(services.hotels.clone()))
        .merge(catalog::routes::routes(services.armadas.clone()))
        .merge(catalog::routes::routes(services.consumptions.clone()))
        .merge(catalog::routes::routes(services.categories.clone()))
        .merge(files::routes(services.files.clone()))
        .merge(auth::routes::routes())
        .nest_service(
            services.storage.public_path(),
            ServeDir::new(services.storage.root()),
        )
        .route("/health", get(health_check))
        .layer(from_fn_with_state(
            services.jwt_validator.clone(),
            middleware::auth_middleware,
        ))
}

fn swagger_routes(config: &SwaggerConfig) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    if let Some(credentials) = config.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        swagger.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        swagger
    }
}

/// Full application: API, Swagger UI and the cross-cutting layers
pub fn build_app(services: &AppServices, app: &AppConfig, swagger: &SwaggerConfig) -> Router {
    Router::new()
        .merge(swagger_routes(swagger))
        .merge(api_routes(services))
        .layer(DefaultBodyLimit::max(app.max_request_body_size))
        .layer(middleware::cors_layer(app.cors_allowed_origins.clone()))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
