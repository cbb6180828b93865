//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use catalog_core::{ErrorResponse, FieldError, Pagination, Product, ProductId, ProductSort};
use catalog_service::{CreateProductRequest, ProductListResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Product catalog with cached reads",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::get_product,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ProductId,
            Product,
            ProductSort,
            Pagination,
            ErrorResponse,
            FieldError,
            CreateProductRequest,
            ProductListResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
