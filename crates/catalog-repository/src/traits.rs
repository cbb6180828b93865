//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, ListQuery, NewProduct, Product, ProductId};

/// Product store gateway.
///
/// Implementations return `CatalogError::NotFound` for a missing product and
/// `CatalogError::Database` for any other store failure.
#[async_trait]
pub trait ProductRepository: Interface {
    /// Persists a new product and returns it with its assigned ID.
    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product>;

    /// Finds a product by ID.
    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product>;

    /// Runs a filtered, sorted, paginated listing.
    ///
    /// Returns the requested page of products together with the total number
    /// of matches across all pages.
    async fn query(&self, query: &ListQuery) -> CatalogResult<(Vec<Product>, u64)>;
}
