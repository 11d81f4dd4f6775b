//! Integration Tests for the Cache Public API
//!
//! Exercises the full stack a consumer would assemble: factory-built
//! engine, decorator chain, events, serializers, and TTL behavior.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use cachekit::{
    Cache, CacheConfig, CacheEvent, CacheFactory, CacheStrategy, DefaultKeyGenerator,
    JsonSerializer, KeyGenerator, MemoryCache, RetryCache, Serializer, TimedCache,
};
use serde::{Deserialize, Serialize};

// == Helper Functions ==

/// Routes cache logs through the test harness capture. Safe to call from
/// every test; only the first initialization wins.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("cachekit=debug")
        .with_test_writer()
        .try_init();
}

fn test_config() -> CacheConfig {
    init_tracing();
    CacheConfig::default()
        .with_max_size(100)
        .with_default_ttl(None)
}

fn create_test_cache() -> MemoryCache<String, String> {
    CacheFactory::create_memory_cache("integration", test_config()).unwrap()
}

// == Decorator Chain Tests ==

#[tokio::test]
async fn test_decorated_stack_behaves_like_bare_engine() -> Result<()> {
    let engine = create_test_cache();
    let cache = RetryCache::new(
        TimedCache::new(engine),
        2,
        Duration::from_millis(5),
    );

    cache
        .set("user:1".to_string(), "alice".to_string(), None)
        .await?;
    assert_eq!(
        cache.get(&"user:1".to_string()).await?,
        Some("alice".to_string())
    );
    assert_eq!(cache.get(&"user:2".to_string()).await?, None);

    let stats = cache.stats().await?;
    assert_eq!(stats.hit_count, 1);
    assert_eq!(stats.miss_count, 1);
    assert_eq!(stats.hit_rate(), 0.5);

    cache.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_timed_decorator_observes_forwarded_calls() -> Result<()> {
    let cache = TimedCache::new(create_test_cache());

    cache.set("k".to_string(), "v".to_string(), None).await?;
    cache.get(&"k".to_string()).await?;
    cache.remove(&"k".to_string()).await?;

    let timings = cache.timings();
    assert_eq!(timings["set"].count, 1);
    assert_eq!(timings["get"].count, 1);
    assert_eq!(timings["remove"].count, 1);
    Ok(())
}

// == TTL Tests ==

#[tokio::test]
async fn test_ttl_expiry_end_to_end() -> Result<()> {
    let cache = create_test_cache();

    cache
        .set(
            "volatile".to_string(),
            "v".to_string(),
            Some(Duration::from_millis(100)),
        )
        .await?;
    cache
        .set("durable".to_string(), "v".to_string(), None)
        .await?;

    assert_eq!(
        cache.get(&"volatile".to_string()).await?,
        Some("v".to_string())
    );

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(cache.get(&"volatile".to_string()).await?, None);
    assert_eq!(
        cache.get(&"durable".to_string()).await?,
        Some("v".to_string())
    );

    let removed = cache.cleanup().await?;
    assert_eq!(removed, 0, "expired entry already removed on read");
    Ok(())
}

// == Eviction Tests ==

#[tokio::test]
async fn test_lfu_cache_under_pressure() -> Result<()> {
    let config = test_config()
        .with_max_size(3)
        .with_strategy(CacheStrategy::Lfu);
    let cache: MemoryCache<String, String> = CacheFactory::create_memory_cache("lfu", config)?;

    cache.set("a".to_string(), "v".to_string(), None).await?;
    cache.set("b".to_string(), "v".to_string(), None).await?;
    cache.set("c".to_string(), "v".to_string(), None).await?;

    // Make "a" and "c" popular; "b" is never read. The incoming "d" also
    // has no reads yet, so the zero-frequency tie falls to the key order
    // and "b" is the victim.
    for _ in 0..3 {
        cache.get(&"a".to_string()).await?;
        cache.get(&"c".to_string()).await?;
    }

    cache.set("d".to_string(), "v".to_string(), None).await?;

    assert!(!cache.contains_key(&"b".to_string()).await?);
    assert!(cache.contains_key(&"a".to_string()).await?);
    assert!(cache.contains_key(&"c".to_string()).await?);
    assert!(cache.contains_key(&"d".to_string()).await?);

    let stats = cache.stats().await?;
    assert_eq!(stats.eviction_count, 1);
    Ok(())
}

// == Event Tests ==

#[tokio::test]
async fn test_events_across_full_lifecycle() -> Result<()> {
    let cache = create_test_cache();
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let log_clone = Arc::clone(&log);
    let id = cache.add_listener(Box::new(move |event| {
        let tag = match event {
            CacheEvent::Hit { key } => format!("hit:{key}"),
            CacheEvent::Miss { key } => format!("miss:{key}"),
            CacheEvent::Set { key, .. } => format!("set:{key}"),
            CacheEvent::Remove { key } => format!("remove:{key}"),
            CacheEvent::Evict { key, .. } => format!("evict:{key}"),
            CacheEvent::Clear => "clear".to_string(),
        };
        log_clone.lock().unwrap().push(tag);
    }));

    cache.set("k".to_string(), "v".to_string(), None).await?;
    cache.get(&"k".to_string()).await?;
    cache.get(&"other".to_string()).await?;
    cache.remove(&"k".to_string()).await?;
    cache.clear().await?;

    assert_eq!(
        *log.lock().unwrap(),
        vec!["set:k", "hit:k", "miss:other", "remove:k", "clear"]
    );

    // After unregistering, operations are silent.
    assert!(cache.remove_listener(id));
    cache.set("k2".to_string(), "v".to_string(), None).await?;
    assert_eq!(log.lock().unwrap().len(), 5);
    Ok(())
}

// == Serializer + Key Generator Tests ==

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Article {
    id: u64,
    title: String,
}

#[tokio::test]
async fn test_cache_with_serialized_payloads_and_generated_keys() -> Result<()> {
    let cache: MemoryCache<String, Vec<u8>> =
        CacheFactory::create_memory_cache("bytes", test_config())?;
    let serializer = JsonSerializer::<Article>::new();
    let keygen = DefaultKeyGenerator::with_prefix("app");

    let article = Article {
        id: 7,
        title: "cache all the things".to_string(),
    };

    let key = keygen.entity_key("article", "7");
    let bytes = serializer.serialize(&article)?;
    cache.set(key.clone(), bytes, None).await?;

    let fetched = cache.get(&key).await?.expect("article should be cached");
    let decoded = serializer.deserialize(&fetched)?;
    assert_eq!(decoded, article);
    Ok(())
}

// == Batch Operation Tests ==

#[tokio::test]
async fn test_batch_operations_match_single_key_semantics() -> Result<()> {
    let cache = create_test_cache();

    let entries: Vec<(String, String)> = (0..5)
        .map(|i| (format!("k{i}"), format!("v{i}")))
        .collect();
    cache.set_all(entries, None).await?;
    assert_eq!(cache.size().await?, 5);

    let wanted: Vec<String> = (0..7).map(|i| format!("k{i}")).collect();
    let found = cache.get_all(&wanted).await?;
    assert_eq!(found.len(), 5);

    let removed = cache.remove_all(&wanted).await?;
    assert_eq!(removed, 5);
    assert_eq!(cache.size().await?, 0);

    let stats = cache.stats().await?;
    assert_eq!(stats.hit_count, 5);
    assert_eq!(stats.miss_count, 2);
    Ok(())
}
