//! Configuration Module
//!
//! Immutable, validated cache configuration with environment loading.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

// == Cache Strategy ==
/// Selects the storage layout and eviction behavior of a cache instance.
///
/// The `Lru`/`Lfu`/`Fifo` variants are shorthand for a memory-only cache
/// with that eviction policy; `MemoryOnly` defaults to LRU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    MemoryOnly,
    DiskOnly,
    MemoryWithDiskBackup,
    Tiered,
    Lru,
    Lfu,
    Fifo,
}

impl CacheStrategy {
    /// Parses a strategy name as it appears in configuration.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "memory" | "memory_only" => Some(Self::MemoryOnly),
            "disk" | "disk_only" => Some(Self::DiskOnly),
            "memory_with_disk_backup" => Some(Self::MemoryWithDiskBackup),
            "tiered" => Some(Self::Tiered),
            "lru" => Some(Self::Lru),
            "lfu" => Some(Self::Lfu),
            "fifo" => Some(Self::Fifo),
            _ => None,
        }
    }
}

// == Cache Config ==
/// Cache configuration parameters.
///
/// Validated once at construction via [`CacheConfig::validate`]; a cache
/// is never built from an invalid config.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Storage/eviction strategy
    pub strategy: CacheStrategy,
    /// Maximum number of entries the cache can hold (must be > 0)
    pub max_size: usize,
    /// Maximum memory footprint in bytes
    pub max_memory_size: u64,
    /// Maximum disk footprint in bytes (disk-backed strategies only)
    pub max_disk_size: u64,
    /// Default TTL for entries without an explicit TTL; None = never expires
    pub default_ttl: Option<Duration>,
    /// Interval between passive expiry sweeps
    pub cleanup_interval: Duration,
    /// Reserved compression hook; no-op when false
    pub compression_enabled: bool,
    /// Reserved encryption hook; no-op when false
    pub encryption_enabled: bool,
    /// Optional namespace prefix applied to generated keys
    pub key_prefix: Option<String>,
    /// Whether entries should survive process restarts
    pub persist_to_disk: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            strategy: CacheStrategy::MemoryOnly,
            max_size: 1000,
            max_memory_size: 50 * 1024 * 1024,
            max_disk_size: 200 * 1024 * 1024,
            default_ttl: Some(Duration::from_secs(3600)),
            cleanup_interval: Duration::from_secs(600),
            compression_enabled: false,
            encryption_enabled: false,
            key_prefix: None,
            persist_to_disk: false,
        }
    }
}

impl CacheConfig {
    // == Constructor ==
    /// Creates a config with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_STRATEGY` - Strategy name (default: memory_only)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_MAX_MEMORY_BYTES` - Memory budget in bytes (default: 50 MB)
    /// - `CACHE_MAX_DISK_BYTES` - Disk budget in bytes (default: 200 MB)
    /// - `CACHE_DEFAULT_TTL_SECS` - Default TTL in seconds, 0 = never (default: 3600)
    /// - `CACHE_CLEANUP_INTERVAL_SECS` - Sweep frequency in seconds (default: 600)
    /// - `CACHE_KEY_PREFIX` - Namespace prefix (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_ttl = match env::var("CACHE_DEFAULT_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.default_ttl,
        };

        Self {
            strategy: env::var("CACHE_STRATEGY")
                .ok()
                .and_then(|v| CacheStrategy::parse(&v))
                .unwrap_or(defaults.strategy),
            max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_size),
            max_memory_size: env::var("CACHE_MAX_MEMORY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_memory_size),
            max_disk_size: env::var("CACHE_MAX_DISK_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_disk_size),
            default_ttl,
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cleanup_interval),
            key_prefix: env::var("CACHE_KEY_PREFIX").ok().filter(|p| !p.is_empty()),
            ..defaults
        }
    }

    // == Validate ==
    /// Checks the config for invalid values.
    ///
    /// # Errors
    /// Returns `CacheError::Configuration` if `max_size` is zero or the
    /// cleanup interval is zero. Byte budgets are unsigned, so negative
    /// sizes are unrepresentable.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::Configuration(
                "max_size must be greater than 0".to_string(),
            ));
        }
        if self.cleanup_interval.is_zero() {
            return Err(CacheError::Configuration(
                "cleanup_interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    // == Copy Helpers ==
    // Each with_* method replaces exactly one field via struct update, so
    // every other field is carried over unchanged. The config tests verify
    // this field-by-field (forgotten-field regression class).

    /// Returns a copy with a replaced strategy.
    pub fn with_strategy(self, strategy: CacheStrategy) -> Self {
        Self { strategy, ..self }
    }

    /// Returns a copy with a replaced entry limit.
    pub fn with_max_size(self, max_size: usize) -> Self {
        Self { max_size, ..self }
    }

    /// Returns a copy with a replaced memory budget.
    pub fn with_max_memory_size(self, max_memory_size: u64) -> Self {
        Self {
            max_memory_size,
            ..self
        }
    }

    /// Returns a copy with a replaced disk budget.
    pub fn with_max_disk_size(self, max_disk_size: u64) -> Self {
        Self {
            max_disk_size,
            ..self
        }
    }

    /// Returns a copy with a replaced default TTL.
    pub fn with_default_ttl(self, default_ttl: Option<Duration>) -> Self {
        Self {
            default_ttl,
            ..self
        }
    }

    /// Returns a copy with a replaced cleanup interval.
    pub fn with_cleanup_interval(self, cleanup_interval: Duration) -> Self {
        Self {
            cleanup_interval,
            ..self
        }
    }

    /// Returns a copy with compression toggled.
    pub fn with_compression_enabled(self, compression_enabled: bool) -> Self {
        Self {
            compression_enabled,
            ..self
        }
    }

    /// Returns a copy with encryption toggled.
    pub fn with_encryption_enabled(self, encryption_enabled: bool) -> Self {
        Self {
            encryption_enabled,
            ..self
        }
    }

    /// Returns a copy with a replaced key prefix.
    pub fn with_key_prefix(self, key_prefix: Option<String>) -> Self {
        Self { key_prefix, ..self }
    }

    /// Returns a copy with disk persistence toggled.
    pub fn with_persist_to_disk(self, persist_to_disk: bool) -> Self {
        Self {
            persist_to_disk,
            ..self
        }
    }
}
