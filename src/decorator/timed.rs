//! Timing Decorator
//!
//! Forwards every call to the wrapped cache and records elapsed time per
//! operation for external metrics. Hit/miss semantics are untouched.

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::cache::{Cache, CacheKey, CacheValue};
use crate::error::Result;
use crate::stats::CacheStats;

// == Operation Timing ==
/// Accumulated latency figures for one cache operation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperationTiming {
    /// Number of recorded invocations
    pub count: u64,
    /// Total time across all invocations
    pub total: Duration,
    /// Slowest single invocation
    pub max: Duration,
}

impl OperationTiming {
    /// Mean duration per invocation, zero if nothing was recorded.
    pub fn average(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total / self.count as u32
        }
    }
}

// == Timed Cache ==
/// Decorator that measures the latency of every forwarded operation.
pub struct TimedCache<K, V, C> {
    inner: C,
    timings: Mutex<HashMap<&'static str, OperationTiming>>,
    _marker: PhantomData<fn(K, V)>,
}

impl<K: CacheKey, V: CacheValue, C: Cache<K, V>> TimedCache<K, V, C> {
    // == Constructor ==
    /// Wraps a cache with latency accounting.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            timings: Mutex::new(HashMap::new()),
            _marker: PhantomData,
        }
    }

    /// Returns a snapshot of the per-operation timings recorded so far.
    pub fn timings(&self) -> HashMap<&'static str, OperationTiming> {
        self.timings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the wrapped cache.
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn record(&self, operation: &'static str, elapsed: Duration) {
        let mut timings = self.timings.lock().unwrap_or_else(PoisonError::into_inner);
        let timing = timings.entry(operation).or_default();
        timing.count += 1;
        timing.total += elapsed;
        timing.max = timing.max.max(elapsed);
    }

    async fn timed<T, F>(&self, operation: &'static str, fut: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        let started = Instant::now();
        let result = fut.await;
        self.record(operation, started.elapsed());
        result
    }
}

#[async_trait]
impl<K: CacheKey, V: CacheValue, C: Cache<K, V>> Cache<K, V> for TimedCache<K, V, C> {
    async fn get(&self, key: &K) -> Result<Option<V>> {
        self.timed("get", self.inner.get(key)).await
    }

    async fn set(&self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        self.timed("set", self.inner.set(key, value, ttl)).await
    }

    async fn get_all(&self, keys: &[K]) -> Result<HashMap<K, V>> {
        self.timed("get_all", self.inner.get_all(keys)).await
    }

    async fn set_all(&self, entries: Vec<(K, V)>, ttl: Option<Duration>) -> Result<()> {
        self.timed("set_all", self.inner.set_all(entries, ttl)).await
    }

    async fn contains_key(&self, key: &K) -> Result<bool> {
        self.timed("contains_key", self.inner.contains_key(key)).await
    }

    async fn remove(&self, key: &K) -> Result<bool> {
        self.timed("remove", self.inner.remove(key)).await
    }

    async fn remove_all(&self, keys: &[K]) -> Result<usize> {
        self.timed("remove_all", self.inner.remove_all(keys)).await
    }

    async fn clear(&self) -> Result<()> {
        self.timed("clear", self.inner.clear()).await
    }

    async fn keys(&self) -> Result<HashSet<K>> {
        self.timed("keys", self.inner.keys()).await
    }

    async fn size(&self) -> Result<usize> {
        self.timed("size", self.inner.size()).await
    }

    async fn stats(&self) -> Result<CacheStats> {
        self.timed("stats", self.inner.stats()).await
    }

    async fn cleanup(&self) -> Result<usize> {
        self.timed("cleanup", self.inner.cleanup()).await
    }

    async fn close(&self) -> Result<()> {
        self.timed("close", self.inner.close()).await
    }
}
