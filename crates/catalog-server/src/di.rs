//! Dependency injection module using Shaku.
//!
//! `CatalogModule` wires the store pool, product repository, Redis cache and
//! product service for a single-process deployment.

use catalog_config::{AppConfig, RedisConfig};
use catalog_core::{module, CatalogError, CatalogResult, HasComponent};
use catalog_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, PostgresProductRepository,
    ProductRepository,
};
use catalog_service::{
    CacheInterface, ProductService, ProductServiceImpl, RedisCacheService,
    RedisCacheServiceParameters,
};
use deadpool_redis::{redis, Pool, PoolConfig, Runtime};
use std::sync::Arc;
use tracing::{info, warn};

module! {
    pub CatalogModule {
        components = [
            DatabasePool,
            PostgresProductRepository,
            RedisCacheService,
            ProductServiceImpl,
        ],
        providers = [],
    }
}

/// Connects the store and cache and builds the module.
pub async fn build_catalog_module(config: &AppConfig) -> CatalogResult<Arc<CatalogModule>> {
    let db_pool = DatabasePool::new(&config.database).await?;
    let cache_pool = create_redis_pool(&config.redis).await?;

    Ok(Arc::new(assemble_module(&db_pool, cache_pool, &config.redis)))
}

/// Builds the module from already-created pools.
pub fn assemble_module(
    db_pool: &DatabasePool,
    cache_pool: Option<Arc<Pool>>,
    redis_config: &RedisConfig,
) -> CatalogModule {
    CatalogModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.pool(),
        })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
            command_timeout: redis_config.command_timeout(),
        })
        .build()
}

/// Creates the Redis pool, or `None` when caching is disabled.
///
/// An unreachable server is logged but not fatal: the cache degrades to
/// misses until it comes back.
pub async fn create_redis_pool(config: &RedisConfig) -> CatalogResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis cache disabled");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| CatalogError::Cache(format!("Failed to create Redis pool: {e}")))?;

    match ping(&pool, config).await {
        Ok(()) => info!("Redis connection pool established"),
        Err(e) => warn!(
            error = %e,
            "Redis is unreachable, serving from the store until it recovers"
        ),
    }

    Ok(Some(Arc::new(pool)))
}

async fn ping(pool: &Pool, config: &RedisConfig) -> Result<(), String> {
    let check = async {
        let mut conn = pool.get().await.map_err(|e| e.to_string())?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    };

    tokio::time::timeout(config.command_timeout(), check)
        .await
        .map_err(|_| "PING timed out".to_string())?
}

/// Resolves the components the server needs directly.
pub trait CatalogResolver {
    /// Resolves the product service.
    fn product_service(&self) -> Arc<dyn ProductService>;

    /// Resolves the store pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    /// Resolves the cache gateway.
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl CatalogResolver for CatalogModule {
    fn product_service(&self) -> Arc<dyn ProductService> {
        self.resolve()
    }

    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}
