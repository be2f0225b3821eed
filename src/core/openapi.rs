use utoipa::openapi::path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{KnownFormat, ObjectBuilder, Schema, SchemaFormat, Type};
use utoipa::openapi::security::{
    HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme,
};
use utoipa::openapi::{ContentBuilder, Ref, Required, ResponseBuilder};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::features::auth;
use crate::features::catalog::models::CatalogEntity;
use crate::features::catalog::{dtos as catalog_dtos, models as catalog_models};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::tour_packages::{
    dtos as tour_packages_dtos, handlers as tour_packages_handlers,
    models as tour_packages_models,
};
use crate::shared::types::{ApiResponse, DeletedDto, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Tour packages
        tour_packages_handlers::list_tour_packages,
        tour_packages_handlers::get_tour_package,
        tour_packages_handlers::create_tour_package,
        tour_packages_handlers::update_tour_package,
        tour_packages_handlers::delete_tour_package,
        // Files
        files_handlers::upload_file,
        files_handlers::delete_file_by_url,
    ),
    components(
        schemas(
            // Shared
            Meta,
            DeletedDto,
            ApiResponse<DeletedDto>,
            // Auth
            auth::dto::MeResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dto::MeResponseDto>,
            // Tour packages
            tour_packages_models::PackageStatus,
            tour_packages_models::ScheduleStatus,
            tour_packages_models::Schedule,
            tour_packages_dtos::CreateTourPackageDto,
            tour_packages_dtos::UpdateTourPackageDto,
            tour_packages_dtos::TourPackageResponseDto,
            ApiResponse<tour_packages_dtos::TourPackageResponseDto>,
            ApiResponse<Vec<tour_packages_dtos::TourPackageResponseDto>>,
            // Catalog
            catalog_models::Destination,
            catalog_models::Hotel,
            catalog_models::Armada,
            catalog_models::Consumption,
            catalog_models::PackageCategory,
            catalog_dtos::DestinationInput,
            catalog_dtos::HotelInput,
            catalog_dtos::ArmadaInput,
            catalog_dtos::ConsumptionInput,
            catalog_dtos::PackageCategoryInput,
            // Files
            files_dtos::UploadFileDto,
            files_dtos::FileResponseDto,
            files_dtos::DeleteFileByUrlDto,
            files_dtos::DeleteFileResponseDto,
            ApiResponse<files_dtos::FileResponseDto>,
            ApiResponse<files_dtos::DeleteFileResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Current principal"),
        (name = "tour-packages", description = "Tour packages (public reads, admin writes)"),
        (name = "catalog", description = "Destinations, hotels, armadas, consumptions and package categories"),
        (name = "files", description = "Image uploads for catalog entities"),
    ),
    modifiers(&SecurityAddon, &CatalogPathsAddon),
    info(
        title = "Travel Agency API",
        version = "0.1.0",
        description = "Tour packages and catalog management API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

/// Documents the generic `/api/{kind}` routes, which `#[utoipa::path]` cannot describe
struct CatalogPathsAddon;

impl Modify for CatalogPathsAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        add_catalog_paths::<catalog_models::Destination>(openapi);
        add_catalog_paths::<catalog_models::Hotel>(openapi);
        add_catalog_paths::<catalog_models::Armada>(openapi);
        add_catalog_paths::<catalog_models::Consumption>(openapi);
        add_catalog_paths::<catalog_models::PackageCategory>(openapi);
    }
}

fn add_catalog_paths<T>(openapi: &mut utoipa::openapi::OpenApi)
where
    T: CatalogEntity + ToSchema,
    T::Input: ToSchema,
{
    let label = T::KIND.label();
    let collection = format!("/api/{}", T::KIND.path_segment());
    let item = format!("{}/{{id}}", collection);

    let entity = || {
        ContentBuilder::new()
            .schema(Some(Ref::from_schema_name(<T as ToSchema>::name())))
            .build()
    };
    let input = || {
        RequestBodyBuilder::new()
            .content(
                "application/json",
                ContentBuilder::new()
                    .schema(Some(Ref::from_schema_name(<T::Input as ToSchema>::name())))
                    .build(),
            )
            .required(Some(Required::True))
            .build()
    };
    let id_param = || {
        ParameterBuilder::new()
            .name("id")
            .parameter_in(ParameterIn::Path)
            .required(Required::True)
            .description(Some(format!("{} id", label)))
            .schema(Some(Schema::Object(
                ObjectBuilder::new()
                    .schema_type(Type::String)
                    .format(Some(SchemaFormat::KnownFormat(KnownFormat::Uuid)))
                    .build(),
            )))
            .build()
    };
    let ok = |description: String| {
        ResponseBuilder::new()
            .description(description)
            .content("application/json", entity())
            .build()
    };
    let admin = || SecurityRequirement::new("bearer_auth", Vec::<String>::new());
    let operation = || OperationBuilder::new().tag("catalog");

    openapi.paths.add_path_operation(
        &collection,
        vec![HttpMethod::Get],
        operation()
            .summary(Some(format!("List {} entries", label)))
            .response("200", ok(format!("{} entries, with meta.total", label)))
            .build(),
    );
    openapi.paths.add_path_operation(
        &collection,
        vec![HttpMethod::Post],
        operation()
            .summary(Some(format!("Create a {} entry", label)))
            .request_body(Some(input()))
            .response("201", ok(format!("{} created", label)))
            .response("400", ResponseBuilder::new().description("Validation failed").build())
            .security(admin())
            .build(),
    );
    openapi.paths.add_path_operation(
        &item,
        vec![HttpMethod::Get],
        operation()
            .summary(Some(format!("Get a {} entry", label)))
            .parameter(id_param())
            .response("200", ok(format!("{} found", label)))
            .response("404", ResponseBuilder::new().description("Not found").build())
            .build(),
    );
    openapi.paths.add_path_operation(
        &item,
        vec![HttpMethod::Put],
        operation()
            .summary(Some(format!("Replace a {} entry", label)))
            .parameter(id_param())
            .request_body(Some(input()))
            .response("200", ok(format!("{} updated", label)))
            .response("404", ResponseBuilder::new().description("Not found").build())
            .security(admin())
            .build(),
    );
    openapi.paths.add_path_operation(
        &item,
        vec![HttpMethod::Delete],
        operation()
            .summary(Some(format!("Delete a {} entry", label)))
            .parameter(id_param())
            .response(
                "200",
                ResponseBuilder::new()
                    .description(format!("{} deleted", label))
                    .content(
                        "application/json",
                        ContentBuilder::new()
                            .schema(Some(Ref::from_schema_name("DeletedDto")))
                            .build(),
                    )
                    .build(),
            )
            .response("404", ResponseBuilder::new().description("Not found").build())
            .response(
                "409",
                ResponseBuilder::new()
                    .description("Still referenced by a tour package")
                    .build(),
            )
            .security(admin())
            .build(),
    );
}
