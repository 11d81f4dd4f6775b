//! Cachekit - A generic in-memory cache
//!
//! Provides TTL expiration, pluggable eviction policies (LRU, LFU, FIFO),
//! statistics, event listeners, and composable decorators behind a single
//! `Cache` contract.

pub mod cache;
pub mod config;
pub mod decorator;
pub mod entry;
pub mod error;
pub mod events;
pub mod factory;
pub mod keys;
pub mod memory;
pub mod policy;
pub mod serialize;
pub mod stats;
mod tasks;


pub use cache::{Cache, CacheKey, CacheValue};
pub use config::{CacheConfig, CacheStrategy};
pub use decorator::{RetryCache, TimedCache};
pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use events::{CacheEvent, CacheListener, EvictionReason, ListenerId};
pub use factory::CacheFactory;
pub use keys::{DefaultKeyGenerator, KeyGenerator};
pub use memory::MemoryCache;
pub use policy::{EvictionPolicy, FifoEvictionPolicy, LfuEvictionPolicy, LruEvictionPolicy};
pub use serialize::{JsonSerializer, Serializer, StringSerializer};
pub use stats::{format_bytes, CacheStats};
