//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.
//! The sweep is advisory: correctness never depends on it firing
//! promptly, because reads detect expiry on their own.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheKey, CacheValue};
use crate::events::{CacheEvent, EvictionReason, ListenerRegistry};
use crate::memory::Store;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task holds only a weak reference to the store, so it cannot keep a
/// dropped cache alive; it exits on its own once the cache is gone. The
/// engine also aborts it explicitly on `close()`.
///
/// # Arguments
/// * `name` - Cache name for log context
/// * `store` - Weak reference to the engine's entry table
/// * `listeners` - Registry notified with an Evict event per removal
/// * `interval` - Time between sweep passes
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on shutdown.
pub(crate) fn spawn_cleanup_task<K: CacheKey, V: CacheValue>(
    name: String,
    store: Weak<RwLock<Store<K, V>>>,
    listeners: Arc<ListenerRegistry<K, V>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(cache = %name, interval_secs = interval.as_secs(), "starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let Some(store) = store.upgrade() else {
                debug!(cache = %name, "cache dropped, stopping cleanup task");
                break;
            };

            // One sweep pass per wakeup; the lock is held only while
            // victims are collected and removed.
            let victims = {
                let mut store = store.write().await;
                store.sweep_expired()
            };

            if victims.is_empty() {
                debug!(cache = %name, "TTL cleanup: no expired entries found");
            } else {
                info!(cache = %name, removed = victims.len(), "TTL cleanup: removed expired entries");
                for key in victims {
                    listeners.emit(&CacheEvent::Evict {
                        key,
                        reason: EvictionReason::Expired,
                    });
                }
            }
        }
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::config::CacheConfig;
    use crate::memory::MemoryCache;

    fn fast_sweep_config() -> CacheConfig {
        CacheConfig::default()
            .with_default_ttl(None)
            .with_cleanup_interval(Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache: MemoryCache<String, String> =
            MemoryCache::new("sweep", fast_sweep_config()).unwrap();

        cache
            .set(
                "expire_soon".to_string(),
                "value".to_string(),
                Some(Duration::from_millis(30)),
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;

        // The sweep should have removed the entry without any read.
        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.entry_count, 0, "expired entry should be swept");
        assert_eq!(stats.expired_count, 1);
        cache.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache: MemoryCache<String, String> =
            MemoryCache::new("sweep", fast_sweep_config()).unwrap();

        cache
            .set(
                "long_lived".to_string(),
                "value".to_string(),
                Some(Duration::from_secs(3600)),
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(
            cache.get(&"long_lived".to_string()).await.unwrap(),
            Some("value".to_string())
        );
        cache.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_task_emits_evict_events() {
        let cache: MemoryCache<String, String> =
            MemoryCache::new("sweep", fast_sweep_config()).unwrap();

        let reasons = Arc::new(std::sync::Mutex::new(Vec::new()));
        let reasons_clone = Arc::clone(&reasons);
        cache.add_listener(Box::new(move |event| {
            if let CacheEvent::Evict { reason, .. } = event {
                reasons_clone.lock().unwrap().push(*reason);
            }
        }));

        cache
            .set(
                "k".to_string(),
                "v".to_string(),
                Some(Duration::from_millis(30)),
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*reasons.lock().unwrap(), vec![EvictionReason::Expired]);
        cache.close().await.unwrap();
    }
}
