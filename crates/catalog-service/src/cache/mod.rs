//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with Redis and in-memory
//! implementations. Both remove wildcard matches through the same
//! bounded-batch routine in [`pattern_delete`].

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
pub mod pattern_delete;
mod redis_cache;

pub use cache_interface::{is_pattern, CacheExt, CacheInterface, CacheLookup};
pub use memory_cache::{InMemoryCacheService, InMemoryCacheServiceParameters};
pub use redis_cache::{
    RedisCacheService, RedisCacheServiceParameters, DEFAULT_COMMAND_TIMEOUT, DEFAULT_TTL,
};
