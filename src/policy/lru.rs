//! LRU Eviction Policy
//!
//! Evicts the entries that were read least recently. Entries that were
//! never read rank before any accessed entry, ordered by creation time.

use std::collections::HashMap;

use crate::cache::CacheKey;
use crate::entry::CacheEntry;

use super::{take_sorted_keys, EvictionPolicy};

// == LRU Policy ==
/// Least Recently Used victim selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruEvictionPolicy;

impl<K: CacheKey, V> EvictionPolicy<K, V> for LruEvictionPolicy {
    fn name(&self) -> &'static str {
        "LRU"
    }

    fn select_keys_to_evict(
        &self,
        entries: &HashMap<K, CacheEntry<V>>,
        count_needed: usize,
    ) -> Vec<K> {
        // Never-accessed entries sort first (flag 0), ordered among
        // themselves by creation time; accessed entries follow by access
        // time ascending.
        take_sorted_keys(entries, count_needed, |_, entry| {
            match entry.last_access_time {
                None => (0u8, entry.created_at),
                Some(t) => (1u8, t),
            }
        })
    }
}
