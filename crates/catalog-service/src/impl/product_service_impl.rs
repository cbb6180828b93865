//! Product service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, CacheLookup, DEFAULT_TTL};
use crate::dto::{CreateProductRequest, ProductListResponse};
use crate::product_service::ProductService;
use async_trait::async_trait;
use catalog_core::{CatalogResult, ListQuery, Pagination, Product, ProductId, ValidateExt};
use catalog_repository::ProductRepository;
use serde::{Deserialize, Serialize};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cached form of a listing. Page metadata is not stored; it is recomputed
/// from the current query on every read.
#[derive(Debug, Serialize, Deserialize)]
struct CachedProductList {
    products: Vec<Product>,
    total: u64,
}

/// Product service with cache-aside reads and write invalidation.
///
/// Cache failures never reach the caller: reads fall back to the store and
/// failed writes or invalidations are logged. Store errors are returned
/// unchanged.
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceImpl {
    #[shaku(inject)]
    product_repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    #[must_use]
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            product_repository,
            cache,
        }
    }

    async fn cache_store<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.store(key, value, DEFAULT_TTL).await {
            warn!(key, error = %e, "Failed to populate cache");
        }
    }

    async fn invalidate_listings(&self) {
        let pattern = cache_keys::product_list_pattern();
        match self.cache.delete(&pattern).await {
            Ok(deleted) => debug!(pattern, deleted, "Invalidated cached product listings"),
            Err(e) => warn!(pattern, error = %e, "Failed to invalidate cached product listings"),
        }
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn create_product(&self, request: CreateProductRequest) -> CatalogResult<Product> {
        debug!("Creating product: {}", request.name);

        request.validate_request()?;

        let product = self
            .product_repository
            .insert(&request.into_new_product())
            .await?;

        info!("Product created: {}", product.id);
        self.invalidate_listings().await;
        Ok(product)
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<Product> {
        let key = cache_keys::product_detail(id);

        if let CacheLookup::Hit(product) = self.cache.lookup::<Product>(&key).await {
            debug!("Product {} served from cache", id);
            return Ok(product);
        }

        let product = self.product_repository.get_by_id(id).await?;
        self.cache_store(&key, &product).await;
        Ok(product)
    }

    async fn list_products(&self, query: ListQuery) -> CatalogResult<ProductListResponse> {
        let key = cache_keys::product_list(&query);

        if let CacheLookup::Hit(cached) = self.cache.lookup::<CachedProductList>(&key).await {
            debug!("Product listing served from cache: {}", key);
            return Ok(ProductListResponse {
                products: cached.products,
                pagination: Pagination::new(query.page, query.limit, cached.total),
            });
        }

        let (products, total) = self.product_repository.query(&query).await?;
        let pagination = Pagination::new(query.page, query.limit, total);

        if products.is_empty() {
            return Ok(ProductListResponse {
                products,
                pagination,
            });
        }

        let cached = CachedProductList { products, total };
        self.cache_store(&key, &cached).await;
        Ok(ProductListResponse {
            products: cached.products,
            pagination,
        })
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl").finish_non_exhaustive()
    }
}
