//! Cache Factory Module
//!
//! Constructs configured cache instances. Callers receive explicit
//! instances and pass them by reference; there is no process-wide
//! default cache.

use tracing::info;

use crate::cache::{CacheKey, CacheValue};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::memory::MemoryCache;

// == Cache Factory ==
/// Builds cache instances from validated configuration.
///
/// Disk and tiered constructors are part of the contract but not yet
/// implemented; they fail loudly instead of silently degrading to a
/// memory-only cache.
pub struct CacheFactory;

impl CacheFactory {
    // == Memory Cache ==
    /// Creates an in-memory cache.
    ///
    /// # Errors
    /// Returns `CacheError::Configuration` if the config is invalid.
    pub fn create_memory_cache<K: CacheKey, V: CacheValue>(
        name: impl Into<String>,
        config: CacheConfig,
    ) -> Result<MemoryCache<K, V>> {
        let name = name.into();
        let cache = MemoryCache::new(name.clone(), config)?;
        info!(cache = %name, "created memory cache");
        Ok(cache)
    }

    // == Disk Cache ==
    /// Creates a disk-backed cache. Not implemented in the core.
    pub fn create_disk_cache<K: CacheKey, V: CacheValue>(
        _name: impl Into<String>,
        _config: CacheConfig,
    ) -> Result<MemoryCache<K, V>> {
        Err(CacheError::Storage(
            "disk cache backend is not implemented".to_string(),
        ))
    }

    // == Tiered Cache ==
    /// Creates a memory-over-disk tiered cache. Not implemented in the core.
    pub fn create_tiered_cache<K: CacheKey, V: CacheValue>(
        _name: impl Into<String>,
        _config: CacheConfig,
    ) -> Result<MemoryCache<K, V>> {
        Err(CacheError::Storage(
            "tiered cache backend is not implemented".to_string(),
        ))
    }
}
