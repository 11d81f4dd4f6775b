//! FIFO Eviction Policy
//!
//! Evicts entries in insertion order, ignoring access recency and
//! frequency entirely.

use std::collections::HashMap;

use crate::cache::CacheKey;
use crate::entry::CacheEntry;

use super::{take_sorted_keys, EvictionPolicy};

// == FIFO Policy ==
/// First In First Out victim selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoEvictionPolicy;

impl<K: CacheKey, V> EvictionPolicy<K, V> for FifoEvictionPolicy {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn select_keys_to_evict(
        &self,
        entries: &HashMap<K, CacheEntry<V>>,
        count_needed: usize,
    ) -> Vec<K> {
        take_sorted_keys(entries, count_needed, |_, entry| entry.created_at)
    }
}
