//! Eviction Policy Module
//!
//! Pluggable victim-selection algorithms. A policy is a pure function
//! over a snapshot of the entry map; the engine stays agnostic of how
//! victims are chosen, so policies are swappable without touching it.

mod fifo;
mod lfu;
mod lru;

use std::collections::HashMap;

use crate::cache::CacheKey;
use crate::config::CacheStrategy;
use crate::entry::CacheEntry;

pub use fifo::FifoEvictionPolicy;
pub use lfu::LfuEvictionPolicy;
pub use lru::LruEvictionPolicy;

// == Eviction Policy Trait ==
/// Selects which entries to discard when capacity is exceeded.
pub trait EvictionPolicy<K: CacheKey, V>: Send + Sync {
    /// Policy name for diagnostics and config matching ("LRU" | "LFU" | "FIFO").
    fn name(&self) -> &'static str;

    /// Returns up to `count_needed` victim keys, best victims first.
    ///
    /// The result has length `min(count_needed, entries.len())` and is
    /// empty when `count_needed` is zero. Ordering is deterministic: ties
    /// are broken by ascending key so repeated runs over the same snapshot
    /// agree.
    fn select_keys_to_evict(
        &self,
        entries: &HashMap<K, CacheEntry<V>>,
        count_needed: usize,
    ) -> Vec<K>;
}

// == Strategy Mapping ==
/// Returns the eviction policy matching a configured strategy.
///
/// Storage-layout strategies (memory-only, disk, tiered) default to LRU.
pub fn policy_for_strategy<K: CacheKey, V>(
    strategy: CacheStrategy,
) -> Box<dyn EvictionPolicy<K, V>> {
    match strategy {
        CacheStrategy::Lfu => Box::new(LfuEvictionPolicy),
        CacheStrategy::Fifo => Box::new(FifoEvictionPolicy),
        _ => Box::new(LruEvictionPolicy),
    }
}

/// Sorts an entry snapshot by the given ordering and returns the first
/// `count_needed` keys. Shared by all built-in policies.
fn take_sorted_keys<K, V, F, O>(
    entries: &HashMap<K, CacheEntry<V>>,
    count_needed: usize,
    sort_key: F,
) -> Vec<K>
where
    K: CacheKey,
    F: Fn(&K, &CacheEntry<V>) -> O,
    O: Ord,
{
    if count_needed == 0 || entries.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<&K> = entries.keys().collect();
    candidates.sort_by_cached_key(|key| (sort_key(key, &entries[*key]), (*key).clone()));
    candidates
        .into_iter()
        .take(count_needed)
        .cloned()
        .collect()
}
