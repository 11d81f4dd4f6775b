//! Memory Cache Module
//!
//! Reference `Cache` implementation: in-process map with TTL expiration,
//! policy-driven capacity enforcement, statistics, and event emission.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{Cache, CacheKey, CacheValue};
use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::error::Result;
use crate::events::{CacheEvent, CacheListener, EvictionReason, ListenerId, ListenerRegistry};
use crate::policy::{policy_for_strategy, EvictionPolicy};
use crate::stats::CacheStats;
use crate::tasks::spawn_cleanup_task;

/// Fixed per-entry bookkeeping overhead used for the memory estimate.
const ENTRY_OVERHEAD_BYTES: u64 = 64;

// == Store ==
/// Entry table plus the state that must stay consistent with it.
///
/// Everything behind one lock: all mutations (set, remove, clear,
/// eviction, sweep) are serialized against each other and against reads
/// of the same key.
pub(crate) struct Store<K, V> {
    pub(crate) entries: HashMap<K, CacheEntry<V>>,
    pub(crate) stats: CacheStats,
    policy: Box<dyn EvictionPolicy<K, V>>,
}

impl<K: CacheKey, V: CacheValue> Store<K, V> {
    /// Removes every expired entry and returns the victims.
    ///
    /// Shared by the `cleanup()` operation and the background sweep task.
    pub(crate) fn sweep_expired(&mut self) -> Vec<K> {
        let expired: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.stats.record_expiration();
        }
        self.stats.set_entry_count(self.entries.len());
        expired
    }
}

// == Memory Cache ==
/// In-memory cache engine.
///
/// Cloning is shallow: clones share the same entry table, statistics,
/// and listeners, so a cache can be handed to several tasks.
pub struct MemoryCache<K: CacheKey, V: CacheValue> {
    name: String,
    config: CacheConfig,
    store: Arc<RwLock<Store<K, V>>>,
    listeners: Arc<ListenerRegistry<K, V>>,
    cleanup_handle: Arc<StdMutex<Option<JoinHandle<()>>>>,
}

impl<K: CacheKey, V: CacheValue> Clone for MemoryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            config: self.config.clone(),
            store: Arc::clone(&self.store),
            listeners: Arc::clone(&self.listeners),
            cleanup_handle: Arc::clone(&self.cleanup_handle),
        }
    }
}

impl<K: CacheKey, V: CacheValue> MemoryCache<K, V> {
    // == Constructor ==
    /// Creates a new cache from a validated configuration.
    ///
    /// The eviction policy is chosen from `config.strategy`. When called
    /// inside a Tokio runtime a background sweep task is spawned at
    /// `config.cleanup_interval`; the sweep is advisory only, expiry is
    /// always also detected on read.
    ///
    /// # Errors
    /// Returns `CacheError::Configuration` if the config fails validation.
    pub fn new(name: impl Into<String>, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let name = name.into();
        let policy = policy_for_strategy(config.strategy);
        debug!(cache = %name, policy = policy.name(), "creating memory cache");

        let store = Arc::new(RwLock::new(Store {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            policy,
        }));
        let listeners = Arc::new(ListenerRegistry::new());

        // Passive sweeps need a runtime; without one, expiry-on-read
        // still keeps the cache correct.
        let handle = tokio::runtime::Handle::try_current().ok().map(|_| {
            spawn_cleanup_task(
                name.clone(),
                Arc::downgrade(&store),
                Arc::clone(&listeners),
                config.cleanup_interval,
            )
        });

        Ok(Self {
            name,
            config,
            store,
            listeners,
            cleanup_handle: Arc::new(StdMutex::new(handle)),
        })
    }

    /// Returns the cache name used in logs and diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configuration this cache was built from.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Listeners ==
    /// Registers an event listener and returns its handle.
    pub fn add_listener(&self, listener: CacheListener<K, V>) -> ListenerId {
        self.listeners.add_listener(listener)
    }

    /// Unregisters a listener. Returns true if it was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove_listener(id)
    }

    /// Unregisters all listeners.
    pub fn clear_listeners(&self) {
        self.listeners.clear_listeners()
    }

    /// Dispatches events after the store lock has been released.
    fn emit_all(&self, events: Vec<CacheEvent<K, V>>) {
        for event in &events {
            self.listeners.emit(event);
        }
    }
}

#[async_trait]
impl<K: CacheKey, V: CacheValue> Cache<K, V> for MemoryCache<K, V> {
    // == Get ==
    async fn get(&self, key: &K) -> Result<Option<V>> {
        let started = Instant::now();
        let mut events = Vec::new();

        let result = {
            let mut store = self.store.write().await;

            // Lookup first, bookkeeping second, so the entry borrow ends
            // before the table or the stats are touched again.
            let lookup = match store.entries.get_mut(key) {
                Some(entry) => {
                    if entry.is_expired() {
                        Some(None)
                    } else {
                        entry.mark_accessed();
                        Some(Some(entry.value.clone()))
                    }
                }
                None => None,
            };

            let outcome = match lookup {
                Some(Some(value)) => {
                    store.stats.record_hit();
                    events.push(CacheEvent::Hit { key: key.clone() });
                    Some(value)
                }
                Some(None) => {
                    // Expired entries count as misses, never hits.
                    store.entries.remove(key);
                    store.stats.record_expiration();
                    store.stats.record_miss();
                    let count = store.entries.len();
                    store.stats.set_entry_count(count);
                    events.push(CacheEvent::Miss { key: key.clone() });
                    None
                }
                None => {
                    store.stats.record_miss();
                    events.push(CacheEvent::Miss { key: key.clone() });
                    None
                }
            };

            let elapsed_us = started.elapsed().as_secs_f64() * 1_000_000.0;
            store.stats.record_access_time_us(elapsed_us);
            outcome
        };

        self.emit_all(events);
        Ok(result)
    }

    // == Set ==
    async fn set(&self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        let effective_ttl = ttl.or(self.config.default_ttl);
        let mut events = Vec::new();

        {
            let mut store = self.store.write().await;

            let entry = CacheEntry::new(value.clone(), effective_ttl);
            let old_value = store.entries.insert(key.clone(), entry).map(|e| e.value);
            events.push(CacheEvent::Set {
                key: key.clone(),
                value,
                old_value,
            });

            // Capacity enforcement: evict exactly the overflow, chosen by
            // the configured policy over the current snapshot.
            let overflow = store.entries.len().saturating_sub(self.config.max_size);
            if overflow > 0 {
                let victims = store.policy.select_keys_to_evict(&store.entries, overflow);
                debug!(
                    cache = %self.name,
                    policy = store.policy.name(),
                    victims = victims.len(),
                    "capacity exceeded, evicting"
                );
                for victim in victims {
                    if store.entries.remove(&victim).is_some() {
                        store.stats.record_eviction();
                        events.push(CacheEvent::Evict {
                            key: victim,
                            reason: EvictionReason::Capacity,
                        });
                    }
                }
            }
            let count = store.entries.len();
            store.stats.set_entry_count(count);
        }

        self.emit_all(events);
        Ok(())
    }

    // == Contains Key ==
    async fn contains_key(&self, key: &K) -> Result<bool> {
        let store = self.store.read().await;
        Ok(store
            .entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false))
    }

    // == Remove ==
    async fn remove(&self, key: &K) -> Result<bool> {
        let removed = {
            let mut store = self.store.write().await;
            let removed = store.entries.remove(key).is_some();
            let count = store.entries.len();
            store.stats.set_entry_count(count);
            removed
        };

        if removed {
            self.listeners.emit(&CacheEvent::Remove { key: key.clone() });
        }
        Ok(removed)
    }

    // == Clear ==
    async fn clear(&self) -> Result<()> {
        {
            let mut store = self.store.write().await;
            store.entries.clear();
            // Historical hit/miss counters deliberately survive a clear.
            store.stats.set_entry_count(0);
        }

        self.listeners.emit(&CacheEvent::Clear);
        Ok(())
    }

    // == Keys ==
    async fn keys(&self) -> Result<HashSet<K>> {
        let store = self.store.read().await;
        Ok(store
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect())
    }

    // == Size ==
    async fn size(&self) -> Result<usize> {
        let store = self.store.read().await;
        Ok(store
            .entries
            .values()
            .filter(|entry| !entry.is_expired())
            .count())
    }

    // == Stats ==
    async fn stats(&self) -> Result<CacheStats> {
        let store = self.store.read().await;
        let total_size: u64 = store
            .entries
            .values()
            .filter_map(|entry| entry.size)
            .map(|s| s as u64)
            .sum();
        let memory_usage = total_size + store.entries.len() as u64 * ENTRY_OVERHEAD_BYTES;

        Ok(store
            .stats
            .clone()
            .with_entry_count(store.entries.len())
            .with_total_size(total_size)
            .with_memory_usage(memory_usage))
    }

    // == Cleanup ==
    async fn cleanup(&self) -> Result<usize> {
        let victims = {
            let mut store = self.store.write().await;
            store.sweep_expired()
        };

        let count = victims.len();
        for key in victims {
            self.listeners.emit(&CacheEvent::Evict {
                key,
                reason: EvictionReason::Expired,
            });
        }
        Ok(count)
    }

    // == Close ==
    async fn close(&self) -> Result<()> {
        if let Ok(mut guard) = self.cleanup_handle.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
                debug!(cache = %self.name, "stopped cleanup task");
            }
        }
        Ok(())
    }
}

impl<K: CacheKey, V: CacheValue> Drop for MemoryCache<K, V> {
    fn drop(&mut self) {
        // Last clone going away takes the sweep task with it.
        if Arc::strong_count(&self.cleanup_handle) == 1 {
            if let Ok(mut guard) = self.cleanup_handle.lock() {
                if let Some(handle) = guard.take() {
                    handle.abort();
                }
            }
        }
    }
}
