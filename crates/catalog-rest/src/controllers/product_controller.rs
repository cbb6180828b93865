//! Product controller.

use crate::{
    extractors::{ProductListQuery, ValidatedJson},
    responses::{created, ok, paged, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_core::{CatalogError, ErrorResponse, ListQuery, Product, ProductId};
use catalog_service::CreateProductRequest;
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product))
}

/// List products.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "A page of products with pagination metadata", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> ApiResult<Vec<Product>> {
    let query = ListQuery::from(params);
    debug!(
        search = %query.search,
        sort = %query.sort,
        page = query.page,
        limit = query.limit,
        "List products request"
    );

    let response = state.product_service.list_products(query).await?;
    paged(response.products, response.pagination)
}

/// Create a new product.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), AppError> {
    debug!("Create product request: {}", request.name);

    let product = state.product_service.create_product(request).await?;
    Ok(created(product))
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Invalid product ID", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    debug!("Get product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let product = state.product_service.get_product(product_id).await?;
    ok(product)
}

/// Helper to parse a product ID from the path parameter.
fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    ProductId::parse(id)
        .map_err(|_| AppError(CatalogError::Validation(format!("Invalid product ID: {id}"))))
}
