//! Product service trait definition.

use crate::dto::{CreateProductRequest, ProductListResponse};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, ListQuery, Product, ProductId};

/// Product use cases.
#[async_trait]
pub trait ProductService: Interface {
    /// Validates and persists a new product, then invalidates cached listings.
    async fn create_product(&self, request: CreateProductRequest) -> CatalogResult<Product>;

    /// Gets a product by ID, reading through the cache.
    async fn get_product(&self, id: ProductId) -> CatalogResult<Product>;

    /// Lists products, reading through the cache.
    async fn list_products(&self, query: ListQuery) -> CatalogResult<ProductListResponse>;
}
