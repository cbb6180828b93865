//! In-process cache implementation.
//!
//! Holds entries in a map with per-entry expiry. Used where no Redis server
//! is available, such as tests and local runs.

use super::pattern_delete::{delete_matching, Keyspace};
use super::CacheInterface;
use async_trait::async_trait;
use catalog_core::CatalogResult;
use parking_lot::Mutex;
use shaku::Component;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory cache service.
#[derive(Component, Default)]
#[shaku(interface = CacheInterface)]
pub struct InMemoryCacheService {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.lock().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true if no live entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `key` holds a live entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries.lock().get(key).is_some_and(|e| e.is_live(now))
    }

    fn matching_keys(&self, pattern: &str) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .iter()
            .filter(|(key, entry)| entry.is_live(now) && glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

/// Matches `text` against a glob with `*` (any run) and `?` (any one character).
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

/// Pages through a snapshot of the keys matching at the first scan call, so
/// deletions made between pages never shift later keys out of the walk.
struct MemoryKeyspace<'a> {
    cache: &'a InMemoryCacheService,
    snapshot: Vec<String>,
}

#[async_trait]
impl Keyspace for MemoryKeyspace<'_> {
    async fn scan(
        &mut self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> CatalogResult<(u64, Vec<String>)> {
        if cursor == 0 {
            self.snapshot = self.cache.matching_keys(pattern);
        }

        let start = usize::try_from(cursor).unwrap_or(usize::MAX).min(self.snapshot.len());
        let end = start.saturating_add(count.max(1)).min(self.snapshot.len());
        let page = self.snapshot[start..end].to_vec();
        let next = if end >= self.snapshot.len() { 0 } else { end as u64 };
        Ok((next, page))
    }

    async fn delete_keys(&mut self, keys: &[String]) -> CatalogResult<u64> {
        let mut entries = self.cache.entries.lock();
        let deleted = keys.iter().filter(|key| entries.remove(*key).is_some()).count();
        Ok(deleted as u64)
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let value = match entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        };

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> CatalogResult<bool> {
        Ok(self.entries.lock().remove(key).is_some())
    }

    async fn delete_pattern(&self, pattern: &str) -> CatalogResult<u64> {
        let mut keyspace = MemoryKeyspace {
            cache: self,
            snapshot: Vec::new(),
        };
        delete_matching(&mut keyspace, pattern).await
    }
}

impl std::fmt::Debug for InMemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheService")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}
