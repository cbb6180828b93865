//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use catalog_core::CatalogResult;
use serde::{de::DeserializeOwned, Serialize};
use shaku::Interface;
use std::time::Duration;
use tracing::warn;

/// Cache gateway for storing and retrieving opaque string values.
///
/// The gateway knows nothing about products: it moves JSON strings by key.
/// Typed access lives in [`CacheExt`].
#[async_trait]
pub trait CacheInterface: Interface {
    /// Get a raw value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>>;

    /// Set a raw value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()>;

    /// Delete a single key.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete_key(&self, key: &str) -> CatalogResult<bool>;

    /// Delete every key matching a glob pattern, in batches of at most 100.
    ///
    /// Returns the number of keys deleted. On failure, batches already
    /// deleted stay deleted.
    async fn delete_pattern(&self, pattern: &str) -> CatalogResult<u64>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Outcome of a typed cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<T> {
    /// The key held a value that decoded as `T`.
    Hit(T),
    /// The key was absent, expired, unreadable, or held undecodable data.
    Miss,
}

impl<T> CacheLookup<T> {
    /// Returns true for a hit.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Converts into an `Option`, discarding the miss.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Hit(value) => Some(value),
            Self::Miss => None,
        }
    }
}

/// Returns true if `key` contains a glob wildcard.
#[must_use]
pub fn is_pattern(key: &str) -> bool {
    key.contains(['*', '?'])
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Reads and decodes a value.
    ///
    /// Retrieval errors and decode errors are logged and reported as a miss,
    /// so callers only ever see `Hit` or `Miss`.
    async fn lookup<T: DeserializeOwned + Send>(&self, key: &str) -> CacheLookup<T> {
        let raw = match self.get_raw(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return CacheLookup::Miss,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, treating as miss");
                return CacheLookup::Miss;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => CacheLookup::Hit(value),
            Err(e) => {
                warn!(key, error = %e, "Cached value could not be decoded, treating as miss");
                CacheLookup::Miss
            }
        }
    }

    /// Encodes and stores a value.
    async fn store<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> CatalogResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Deletes a single key, or every matching key when `key_or_pattern`
    /// contains a wildcard. Returns the number of keys removed.
    async fn delete(&self, key_or_pattern: &str) -> CatalogResult<u64> {
        if is_pattern(key_or_pattern) {
            self.delete_pattern(key_or_pattern).await
        } else {
            Ok(u64::from(self.delete_key(key_or_pattern).await?))
        }
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pattern() {
        assert!(is_pattern("catalog:products:list:*"));
        assert!(is_pattern("catalog:products:detail:?"));
        assert!(!is_pattern("catalog:products:detail:7"));
    }

    #[test]
    fn test_cache_lookup_into_option() {
        assert_eq!(CacheLookup::Hit(3).into_option(), Some(3));
        assert_eq!(CacheLookup::<i32>::Miss.into_option(), None);
        assert!(CacheLookup::Hit(()).is_hit());
        assert!(!CacheLookup::<()>::Miss.is_hit());
    }
}
