//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support
//! and access accounting for the eviction policies.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Arbitrary per-entry metadata attached by callers.
pub type EntryMetadata = HashMap<String, serde_json::Value>;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// `mark_accessed` is the only in-place mutation; everything else goes
/// through the `with_*` copy helpers so the engine can treat entries as
/// copy-on-write.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
    /// Last access timestamp (Unix milliseconds), None = never read
    pub last_access_time: Option<u64>,
    /// Number of reads that hit this entry
    pub access_count: u64,
    /// Estimated size in bytes, if known
    pub size: Option<usize>,
    /// Optional caller-supplied metadata
    pub metadata: Option<EntryMetadata>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional time-to-live; None means the entry never expires
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        let now = current_timestamp_ms();
        let expires_at = ttl.map(|ttl| now + ttl.as_millis() as u64);

        Self {
            value,
            created_at: now,
            expires_at,
            last_access_time: None,
            access_count: 0,
            size: None,
            metadata: None,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// time is greater than or equal to the expiration time, so once the
    /// TTL duration has fully elapsed the entry is immediately expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Mark Accessed ==
    /// Records a read: increments the access count and stamps the access time.
    ///
    /// This is the single mutation path for live entries; the eviction
    /// policies order entries by the counters maintained here.
    pub fn mark_accessed(&mut self) {
        self.access_count += 1;
        self.last_access_time = Some(current_timestamp_ms());
    }

    // == Age ==
    /// Returns the time since this entry was created, in milliseconds.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }

    /// Returns the time since the last access in milliseconds, or None if
    /// the entry was never read.
    pub fn time_since_last_access_ms(&self) -> Option<u64> {
        self.last_access_time
            .map(|t| current_timestamp_ms().saturating_sub(t))
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let now = current_timestamp_ms();
            expires.saturating_sub(now)
        })
    }

    // == Copy Helpers ==
    /// Returns a copy with a replaced value; every other field is preserved.
    pub fn with_value(self, value: V) -> Self {
        Self { value, ..self }
    }

    /// Returns a copy with a replaced expiration; every other field is preserved.
    pub fn with_expires_at(self, expires_at: Option<u64>) -> Self {
        Self { expires_at, ..self }
    }

    /// Returns a copy with a replaced size estimate; every other field is preserved.
    pub fn with_size(self, size: Option<usize>) -> Self {
        Self { size, ..self }
    }

    /// Returns a copy with replaced metadata; every other field is preserved.
    pub fn with_metadata(self, metadata: Option<EntryMetadata>) -> Self {
        Self { metadata, ..self }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
