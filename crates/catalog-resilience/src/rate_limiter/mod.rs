//! Rate limiter implementation.

use catalog_core::CatalogError;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use std::hash::Hash;
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// How often idle client state is pruned by [`KeyedRateLimiter::spawn_pruner`].
pub const DEFAULT_PRUNE_INTERVAL: Duration = Duration::from_secs(180);

/// Rate limiter that tracks a separate budget per key.
pub struct KeyedRateLimiter<K: Hash + Eq + Clone> {
    limiter: Arc<DefaultKeyedRateLimiter<K>>,
}

/// Rate limiter keyed by client address.
pub type ClientRateLimiter = KeyedRateLimiter<IpAddr>;

impl<K: Hash + Eq + Clone> KeyedRateLimiter<K> {
    /// Creates a new rate limiter allowing `requests_per_second` for each key.
    pub fn new(requests_per_second: u32) -> Self {
        let per_second = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(per_second);
        let limiter = Arc::new(GovernorRateLimiter::keyed(quota));
        Self { limiter }
    }

    /// Checks if a request for `key` is allowed (non-blocking).
    pub fn check(&self, key: &K) -> Result<(), CatalogError> {
        self.limiter
            .check_key(key)
            .map_err(|_| CatalogError::RateLimitExceeded)
    }

    /// Drops state for keys whose budget has fully replenished.
    pub fn retain_recent(&self) {
        prune(&self.limiter);
    }

    /// Spawns a task that calls [`Self::retain_recent`] every `period`.
    ///
    /// The task holds a weak handle and exits once every clone of the limiter
    /// is dropped. Returns `None` when called outside a Tokio runtime.
    pub fn spawn_pruner(&self, period: Duration) -> Option<JoinHandle<()>>
    where
        K: Send + Sync + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().ok()?;
        let limiter = Arc::downgrade(&self.limiter);
        let period = period.max(Duration::from_millis(1));

        Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    debug!("Rate limiter dropped, pruner exiting");
                    break;
                };
                prune(&limiter);
            }
        }))
    }

    /// Returns the number of keys currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    /// Returns true if no keys are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }
}

fn prune<K: Hash + Eq + Clone>(limiter: &DefaultKeyedRateLimiter<K>) {
    limiter.retain_recent();
    limiter.shrink_to_fit();
    debug!(tracked_keys = limiter.len(), "Rate limiter state pruned");
}

impl<K: Hash + Eq + Clone> Clone for KeyedRateLimiter<K> {
    fn clone(&self) -> Self {
        Self {
            limiter: Arc::clone(&self.limiter),
        }
    }
}

impl<K: Hash + Eq + Clone> std::fmt::Debug for KeyedRateLimiter<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedRateLimiter").finish_non_exhaustive()
    }
}
