//! Bounded-batch deletion of keys matching a glob pattern.
//!
//! The keyspace is walked with a cursor instead of being listed in one call,
//! and matches are deleted in batches of [`BATCH_SIZE`], so the work per
//! round trip stays bounded however many keys match.

use async_trait::async_trait;
use catalog_core::CatalogResult;
use tracing::debug;

/// Maximum number of keys per delete call, also used as the scan hint.
pub const BATCH_SIZE: usize = 100;

/// A cursor-scannable keyspace.
#[async_trait]
pub trait Keyspace: Send {
    /// Returns the next cursor and a page of keys matching `pattern`.
    ///
    /// A returned cursor of `0` means the scan is complete.
    async fn scan(
        &mut self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> CatalogResult<(u64, Vec<String>)>;

    /// Deletes `keys`, returning how many existed.
    async fn delete_keys(&mut self, keys: &[String]) -> CatalogResult<u64>;
}

/// Deletes every key matching `pattern`.
///
/// Matches are flushed whenever exactly [`BATCH_SIZE`] have accumulated, and
/// once more for the remainder after the cursor returns to `0`. The first
/// scan or delete error aborts the walk; earlier batches stay deleted.
pub async fn delete_matching<K>(keyspace: &mut K, pattern: &str) -> CatalogResult<u64>
where
    K: Keyspace + ?Sized,
{
    let mut cursor = 0;
    let mut batch: Vec<String> = Vec::with_capacity(BATCH_SIZE);
    let mut deleted = 0;
    let mut batches = 0;

    loop {
        let (next, keys) = keyspace.scan(cursor, pattern, BATCH_SIZE).await?;

        for key in keys {
            batch.push(key);
            if batch.len() == BATCH_SIZE {
                deleted += keyspace.delete_keys(&batch).await?;
                batches += 1;
                batch.clear();
            }
        }

        cursor = next;
        if cursor == 0 {
            break;
        }
    }

    if !batch.is_empty() {
        deleted += keyspace.delete_keys(&batch).await?;
        batches += 1;
    }

    debug!(pattern, deleted, batches, "Deleted keys matching pattern");
    Ok(deleted)
}
