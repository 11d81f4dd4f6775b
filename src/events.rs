//! Cache Event Module
//!
//! Observable hooks fired on every cache mutation and lookup. Listeners
//! are plain callbacks dispatched synchronously in registration order;
//! a panicking listener is isolated so it can neither break the cache
//! operation that fired the event nor starve later listeners.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

// == Eviction Reason ==
/// Why an entry was evicted from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// Removed by the eviction policy to satisfy `max_size`
    Capacity,
    /// Removed because its TTL elapsed
    Expired,
}

// == Cache Event ==
/// Closed set of events emitted by a cache engine.
#[derive(Debug, Clone)]
pub enum CacheEvent<K, V> {
    /// A `get` found a live entry
    Hit { key: K },
    /// A `get` found nothing (or only an expired entry)
    Miss { key: K },
    /// A value was inserted or replaced
    Set {
        key: K,
        value: V,
        old_value: Option<V>,
    },
    /// An entry was explicitly removed
    Remove { key: K },
    /// An entry was evicted
    Evict { key: K, reason: EvictionReason },
    /// The whole cache was cleared
    Clear,
}

/// Callback invoked for every emitted event.
pub type CacheListener<K, V> = Box<dyn Fn(&CacheEvent<K, V>) + Send + Sync>;

/// Handle returned by `add_listener`, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

// == Listener Registry ==
/// Owns the registered listeners for one cache instance.
///
/// The engine delegates to this registry instead of inheriting shared
/// listener state, so two cache instances never observe each other's
/// events.
///
/// Listeners are stored behind `Arc` so dispatch runs against a snapshot
/// taken outside the registry lock; a callback may therefore register or
/// unregister listeners (including itself) without deadlocking. Such
/// changes take effect from the next emitted event.
pub struct ListenerRegistry<K, V> {
    #[allow(clippy::type_complexity)]
    listeners: Mutex<Vec<(ListenerId, Arc<dyn Fn(&CacheEvent<K, V>) + Send + Sync>)>>,
    next_id: Mutex<u64>,
}

impl<K, V> Default for ListenerRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ListenerRegistry<K, V> {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
        }
    }

    // == Add Listener ==
    /// Registers a listener and returns a handle for later removal.
    pub fn add_listener(&self, listener: CacheListener<K, V>) -> ListenerId {
        let mut next_id = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
        let id = ListenerId(*next_id);
        *next_id += 1;

        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::from(listener)));
        id
    }

    // == Remove Listener ==
    /// Unregisters a listener. Returns true if it was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    // == Clear Listeners ==
    /// Unregisters all listeners.
    pub fn clear_listeners(&self) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Emit ==
    /// Dispatches an event to every listener in registration order.
    ///
    /// The registered list is cloned and the lock released before any
    /// callback runs, so listeners can re-enter the registry. Each
    /// invocation is wrapped in `catch_unwind`: a panicking listener is
    /// logged and skipped, and the remaining listeners still run.
    pub fn emit(&self, event: &CacheEvent<K, V>) {
        let snapshot: Vec<_> = {
            let listeners = self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            listeners
                .iter()
                .map(|(id, listener)| (*id, Arc::clone(listener)))
                .collect()
        };

        for (id, listener) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                warn!(listener_id = id.0, "cache listener panicked; skipping");
            }
        }
    }
}

impl<K, V> std::fmt::Debug for ListenerRegistry<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
