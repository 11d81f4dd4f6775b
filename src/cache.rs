//! Cache Contract Module
//!
//! The operation surface every cache implementation (memory, disk,
//! tiered) and every decorator must satisfy. External collaborators are
//! only allowed to depend on this trait, never on a concrete engine.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::stats::CacheStats;

// == Key / Value Bounds ==
/// Capability set required of cache keys.
///
/// `Ord` is required so eviction tie-breaks are deterministic.
pub trait CacheKey: Eq + Hash + Ord + Clone + Debug + Send + Sync + 'static {}

impl<T> CacheKey for T where T: Eq + Hash + Ord + Clone + Debug + Send + Sync + 'static {}

/// Capability set required of cache values.
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T> CacheValue for T where T: Clone + Send + Sync + 'static {}

// == Cache Trait ==
/// Contract implemented by every cache.
///
/// All operations are fallible; callers are expected to treat any cache
/// error as a miss and fall back to the source of truth. The batch
/// operations default to repeated single-key calls so they are observably
/// equivalent to them, including event order.
#[async_trait]
pub trait Cache<K: CacheKey, V: CacheValue>: Send + Sync {
    /// Retrieves a value by key.
    ///
    /// Returns `None` on a miss; an expired entry counts as a miss and is
    /// removed on the way out.
    async fn get(&self, key: &K) -> Result<Option<V>>;

    /// Stores a key-value pair with optional TTL.
    ///
    /// Falls back to the configured default TTL when `ttl` is `None`;
    /// capacity is enforced after the insert.
    async fn set(&self, key: K, value: V, ttl: Option<Duration>) -> Result<()>;

    /// Retrieves several keys at once; absent keys are simply omitted.
    async fn get_all(&self, keys: &[K]) -> Result<HashMap<K, V>> {
        let mut found = HashMap::new();
        for key in keys {
            if let Some(value) = self.get(key).await? {
                found.insert(key.clone(), value);
            }
        }
        Ok(found)
    }

    /// Stores several entries with a shared optional TTL.
    async fn set_all(&self, entries: Vec<(K, V)>, ttl: Option<Duration>) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value, ttl).await?;
        }
        Ok(())
    }

    /// Returns true only if the key is present and not expired.
    ///
    /// Does not count as a hit or a miss.
    async fn contains_key(&self, key: &K) -> Result<bool>;

    /// Removes an entry. Returns true if something was removed.
    async fn remove(&self, key: &K) -> Result<bool>;

    /// Removes several entries and returns how many were actually removed.
    async fn remove_all(&self, keys: &[K]) -> Result<usize> {
        let mut removed = 0;
        for key in keys {
            if self.remove(key).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Drops all entries. Historical hit/miss counters are preserved.
    async fn clear(&self) -> Result<()>;

    /// Returns the keys of all live entries.
    async fn keys(&self) -> Result<HashSet<K>>;

    /// Returns the number of live (unexpired, best effort) entries.
    async fn size(&self) -> Result<usize>;

    /// Returns a snapshot of the statistics counters.
    async fn stats(&self) -> Result<CacheStats>;

    /// Actively sweeps expired entries and returns how many were removed.
    async fn cleanup(&self) -> Result<usize>;

    /// Releases timers and resources. Idempotent.
    async fn close(&self) -> Result<()>;
}
