//! LFU Eviction Policy
//!
//! Evicts the entries with the lowest access count; among entries tied on
//! frequency, the stalest one (oldest last access) goes first.

use std::collections::HashMap;

use crate::cache::CacheKey;
use crate::entry::CacheEntry;

use super::{take_sorted_keys, EvictionPolicy};

// == LFU Policy ==
/// Least Frequently Used victim selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfuEvictionPolicy;

impl<K: CacheKey, V> EvictionPolicy<K, V> for LfuEvictionPolicy {
    fn name(&self) -> &'static str {
        "LFU"
    }

    fn select_keys_to_evict(
        &self,
        entries: &HashMap<K, CacheEntry<V>>,
        count_needed: usize,
    ) -> Vec<K> {
        // Frequency ascending, then access time ascending (never-accessed
        // first within a frequency bucket).
        take_sorted_keys(entries, count_needed, |_, entry| {
            (
                entry.access_count,
                entry.last_access_time.is_some() as u8,
                entry.last_access_time.unwrap_or(0),
            )
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::tests::entry_with;

    #[test]
    fn test_lfu_evicts_least_frequent() {
        let mut entries = HashMap::new();
        entries.insert("five".to_string(), entry_with(1, Some(10), 5));
        entries.insert("two".to_string(), entry_with(1, Some(10), 2));
        entries.insert("ten".to_string(), entry_with(1, Some(10), 10));

        let victims = LfuEvictionPolicy.select_keys_to_evict(&entries, 1);
        assert_eq!(victims, vec!["two".to_string()]);
    }

    #[test]
    fn test_lfu_frequency_tie_broken_by_staleness() {
        let mut entries = HashMap::new();
        entries.insert("fresh".to_string(), entry_with(1, Some(200), 3));
        entries.insert("stale".to_string(), entry_with(1, Some(100), 3));

        let victims = LfuEvictionPolicy.select_keys_to_evict(&entries, 1);
        assert_eq!(
            victims,
            vec!["stale".to_string()],
            "stalest of the frequency-tied entries goes first"
        );
    }

    #[test]
    fn test_lfu_full_ranking() {
        let mut entries = HashMap::new();
        entries.insert("hot".to_string(), entry_with(1, Some(50), 9));
        entries.insert("warm".to_string(), entry_with(1, Some(40), 4));
        entries.insert("cold".to_string(), entry_with(1, None, 0));

        let victims = LfuEvictionPolicy.select_keys_to_evict(&entries, 3);
        assert_eq!(
            victims,
            vec!["cold".to_string(), "warm".to_string(), "hot".to_string()]
        );
    }

    #[test]
    fn test_lfu_complete_tie_broken_by_key() {
        let mut entries = HashMap::new();
        entries.insert("b".to_string(), entry_with(1, Some(100), 2));
        entries.insert("a".to_string(), entry_with(1, Some(100), 2));

        let victims = LfuEvictionPolicy.select_keys_to_evict(&entries, 2);
        assert_eq!(victims, vec!["a".to_string(), "b".to_string()]);
    }
}
