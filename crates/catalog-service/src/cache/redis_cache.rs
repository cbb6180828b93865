//! Redis-based cache implementation.

use super::pattern_delete::{delete_matching, Keyspace};
use super::CacheInterface;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult};
use catalog_resilience::with_timeout;
use deadpool_redis::{
    redis::{self, AsyncCommands},
    Connection, Pool,
};
use shaku::Component;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default upper bound for a single Redis command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(500);

/// Redis-based cache service.
///
/// Every command is bounded by `command_timeout`, so a hung server surfaces
/// as a cache error rather than a stalled request.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool. `None` disables caching.
    pool: Option<Arc<Pool>>,
    /// Upper bound for a single command.
    #[shaku(default = DEFAULT_COMMAND_TIMEOUT)]
    command_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>, command_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            command_timeout,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> CatalogResult<Connection> {
        match &self.pool {
            Some(pool) => bounded(self.command_timeout, "connection checkout", pool.get()).await,
            None => Err(CatalogError::cache("Cache is disabled")),
        }
    }
}

/// Runs a Redis future under the command timeout.
///
/// Command failures and timeouts both surface as `CatalogError::Cache`.
async fn bounded<T, E, F>(timeout: Duration, operation: &str, fut: F) -> CatalogResult<T>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    with_timeout(timeout, move || async move {
        fut.await
            .map_err(|e| CatalogError::cache(format!("Redis {operation} failed: {e}")))
    })
    .await
    .map_err(|e| match e {
        CatalogError::Timeout(detail) => {
            CatalogError::cache(format!("Redis {operation} timed out: {detail}"))
        }
        other => other,
    })
}

/// A pooled connection viewed as a scannable keyspace.
struct RedisKeyspace<'a> {
    conn: &'a mut Connection,
    timeout: Duration,
}

#[async_trait]
impl Keyspace for RedisKeyspace<'_> {
    async fn scan(
        &mut self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> CatalogResult<(u64, Vec<String>)> {
        let mut cmd = redis::cmd("SCAN");
        cmd.arg(cursor).arg("MATCH").arg(pattern).arg("COUNT").arg(count);

        let page: (u64, Vec<String>) =
            bounded(self.timeout, "SCAN", cmd.query_async(&mut *self.conn)).await?;
        Ok(page)
    }

    async fn delete_keys(&mut self, keys: &[String]) -> CatalogResult<u64> {
        let deleted: u64 = bounded(self.timeout, "DEL", self.conn.del(keys)).await?;
        Ok(deleted)
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = bounded(self.command_timeout, "GET", conn.get(key)).await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        bounded::<(), _, _>(
            self.command_timeout,
            "SETEX",
            conn.set_ex(key, value, ttl_secs),
        )
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> CatalogResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: u64 = bounded(self.command_timeout, "DEL", conn.del(key)).await?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> CatalogResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let mut keyspace = RedisKeyspace {
            conn: &mut conn,
            timeout: self.command_timeout,
        };
        delete_matching(&mut keyspace, pattern).await
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_reads_miss_and_writes_are_noops() {
        let cache = RedisCacheService::disabled();

        assert_eq!(cache.get_raw("catalog:products:detail:1").await.unwrap(), None);
        assert!(cache.set_raw("k", "v", DEFAULT_TTL).await.is_ok());
        assert!(!cache.delete_key("k").await.unwrap());
        assert_eq!(cache.delete_pattern("catalog:products:list:*").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bounded_maps_errors_to_cache_errors() {
        let result: CatalogResult<()> = bounded(Duration::from_secs(1), "GET", async {
            Err::<(), _>("connection reset")
        })
        .await;

        match result {
            Err(CatalogError::Cache(message)) => assert!(message.contains("GET")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bounded_times_out_hung_commands() {
        let result: CatalogResult<()> = bounded(
            Duration::from_millis(10),
            "GET",
            std::future::pending::<Result<(), String>>(),
        )
        .await;

        match result {
            Err(CatalogError::Cache(detail)) => assert!(detail.contains("GET timed out")),
            other => panic!("expected a cache error, got {other:?}"),
        }
    }
}
