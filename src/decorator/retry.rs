//! Retry Decorator
//!
//! Retries failed operations against the wrapped cache with a fixed
//! delay between attempts. The only component that recovers from
//! failures locally; everything else surfaces them to the caller.

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{Cache, CacheKey, CacheValue};
use crate::error::Result;
use crate::stats::CacheStats;

/// Runs one operation with the retry loop.
///
/// Total attempts = 1 + max_retries. The delay uses `tokio::time::sleep`,
/// so dropping the future cancels an in-flight wait; a success is never
/// retried, and the final failure is returned as-is.
macro_rules! with_retries {
    ($self:expr, $op:literal, $call:expr) => {{
        let mut attempt: u32 = 0;
        loop {
            match $call.await {
                Ok(value) => break Ok(value),
                Err(err) if attempt < $self.max_retries => {
                    attempt += 1;
                    debug!(
                        operation = $op,
                        attempt,
                        max_retries = $self.max_retries,
                        error = %err,
                        "cache operation failed, retrying"
                    );
                    tokio::time::sleep($self.retry_delay).await;
                }
                Err(err) => break Err(err),
            }
        }
    }};
}

// == Retry Cache ==
/// Decorator that retries failing operations on the wrapped cache.
pub struct RetryCache<K, V, C> {
    inner: C,
    max_retries: u32,
    retry_delay: Duration,
    _marker: PhantomData<fn(K, V)>,
}

impl<K: CacheKey, V: CacheValue, C: Cache<K, V>> RetryCache<K, V, C> {
    // == Constructor ==
    /// Wraps a cache with retry behavior.
    ///
    /// # Arguments
    /// * `inner` - The cache to delegate to
    /// * `max_retries` - Additional attempts after the first failure
    /// * `retry_delay` - Fixed delay between attempts
    pub fn new(inner: C, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            retry_delay,
            _marker: PhantomData,
        }
    }

    /// Returns the wrapped cache.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

#[async_trait]
impl<K: CacheKey, V: CacheValue, C: Cache<K, V>> Cache<K, V> for RetryCache<K, V, C> {
    async fn get(&self, key: &K) -> Result<Option<V>> {
        with_retries!(self, "get", self.inner.get(key))
    }

    async fn set(&self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        with_retries!(self, "set", self.inner.set(key.clone(), value.clone(), ttl))
    }

    async fn get_all(&self, keys: &[K]) -> Result<HashMap<K, V>> {
        with_retries!(self, "get_all", self.inner.get_all(keys))
    }

    async fn set_all(&self, entries: Vec<(K, V)>, ttl: Option<Duration>) -> Result<()> {
        with_retries!(self, "set_all", self.inner.set_all(entries.clone(), ttl))
    }

    async fn contains_key(&self, key: &K) -> Result<bool> {
        with_retries!(self, "contains_key", self.inner.contains_key(key))
    }

    async fn remove(&self, key: &K) -> Result<bool> {
        with_retries!(self, "remove", self.inner.remove(key))
    }

    async fn remove_all(&self, keys: &[K]) -> Result<usize> {
        with_retries!(self, "remove_all", self.inner.remove_all(keys))
    }

    async fn clear(&self) -> Result<()> {
        with_retries!(self, "clear", self.inner.clear())
    }

    async fn keys(&self) -> Result<HashSet<K>> {
        with_retries!(self, "keys", self.inner.keys())
    }

    async fn size(&self) -> Result<usize> {
        with_retries!(self, "size", self.inner.size())
    }

    async fn stats(&self) -> Result<CacheStats> {
        with_retries!(self, "stats", self.inner.stats())
    }

    async fn cleanup(&self) -> Result<usize> {
        with_retries!(self, "cleanup", self.inner.cleanup())
    }

    async fn close(&self) -> Result<()> {
        with_retries!(self, "close", self.inner.close())
    }
}
