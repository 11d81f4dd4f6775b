//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, expirations,
//! and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hit_count: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub miss_count: u64,
    /// Number of entries removed because their TTL elapsed
    pub expired_count: u64,
    /// Number of entries evicted by the capacity policy
    pub eviction_count: u64,
    /// Current number of entries in the cache
    pub entry_count: usize,
    /// Sum of known entry sizes in bytes
    pub total_size: u64,
    /// Estimated memory usage in bytes
    pub memory_usage: u64,
    /// Disk usage in bytes (disk-backed strategies only)
    pub disk_usage: u64,
    /// Rolling average time spent in `get`, in microseconds
    pub average_access_time_us: f64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Derived Metrics ==
    /// Total number of read attempts (hits + misses).
    pub fn total_access(&self) -> u64 {
        self.hit_count + self.miss_count
    }

    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_access();
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }

    /// Calculates the cache miss rate, with the same zero guard as `hit_rate`.
    pub fn miss_rate(&self) -> f64 {
        let total = self.total_access();
        if total == 0 {
            0.0
        } else {
            self.miss_count as f64 / total as f64
        }
    }

    // == Recording ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hit_count += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    /// Increments the expiration counter.
    pub fn record_expiration(&mut self) {
        self.expired_count += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.eviction_count += 1;
    }

    /// Folds one observed `get` latency into the rolling average.
    pub fn record_access_time_us(&mut self, elapsed_us: f64) {
        let n = self.total_access();
        if n <= 1 {
            self.average_access_time_us = elapsed_us;
        } else {
            let n = n as f64;
            self.average_access_time_us += (elapsed_us - self.average_access_time_us) / n;
        }
    }

    /// Updates the entry count.
    pub fn set_entry_count(&mut self, count: usize) {
        self.entry_count = count;
    }

    // == Copy Helpers ==
    // Same forgotten-field footgun as CacheConfig: each with_* replaces
    // exactly one field and the tests verify the rest survive.

    /// Returns a copy with a replaced hit count.
    pub fn with_hit_count(self, hit_count: u64) -> Self {
        Self { hit_count, ..self }
    }

    /// Returns a copy with a replaced miss count.
    pub fn with_miss_count(self, miss_count: u64) -> Self {
        Self { miss_count, ..self }
    }

    /// Returns a copy with a replaced expiration count.
    pub fn with_expired_count(self, expired_count: u64) -> Self {
        Self {
            expired_count,
            ..self
        }
    }

    /// Returns a copy with a replaced eviction count.
    pub fn with_eviction_count(self, eviction_count: u64) -> Self {
        Self {
            eviction_count,
            ..self
        }
    }

    /// Returns a copy with a replaced entry count.
    pub fn with_entry_count(self, entry_count: usize) -> Self {
        Self {
            entry_count,
            ..self
        }
    }

    /// Returns a copy with a replaced total size.
    pub fn with_total_size(self, total_size: u64) -> Self {
        Self { total_size, ..self }
    }

    /// Returns a copy with replaced memory usage.
    pub fn with_memory_usage(self, memory_usage: u64) -> Self {
        Self {
            memory_usage,
            ..self
        }
    }

    /// Returns a copy with replaced disk usage.
    pub fn with_disk_usage(self, disk_usage: u64) -> Self {
        Self { disk_usage, ..self }
    }

    /// Returns a copy with a replaced average access time.
    pub fn with_average_access_time_us(self, average_access_time_us: f64) -> Self {
        Self {
            average_access_time_us,
            ..self
        }
    }
}

// == Formatting ==
/// Formats a byte count as a human-readable string with one decimal place.
///
/// # Examples
/// `512` -> `"512 B"`, `2048` -> `"2.0 KB"`, `5_242_880` -> `"5.0 MB"`
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
