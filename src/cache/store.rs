//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking
//! and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{current_timestamp_ms, CacheConfig, CacheEntry, CacheStats, InsertionOrder};

// == TTL Cache ==
/// Bounded key/value store whose entries expire after a fixed TTL.
///
/// Eviction is FIFO by write time: `set` moves a key to the newest
/// position, `get` never does.
#[derive(Debug)]
pub struct TtlCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Write order, oldest first
    order: InsertionOrder,
    /// Activity counters
    stats: CacheStats,
    ttl: Duration,
    max_size: usize,
}

impl<T: Clone> TtlCache<T> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// A `max_size` of zero is treated as one.
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(max_size),
            ttl,
            max_size,
        }
    }

    /// Creates an empty cache from a `CacheConfig`.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl, config.max_size)
    }

    // == Set ==
    /// Inserts or replaces the value under `key`.
    ///
    /// The entry is stamped with the current time and becomes the newest
    /// write. Expired entries are then swept, and the oldest writes are
    /// evicted until the cache is back within `max_size`.
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();

        self.entries
            .insert(key.clone(), CacheEntry::new(key.clone(), value));
        self.order.record(&key);

        self.sweep_expired();
        self.enforce_size_limit();
    }

    // == Get ==
    /// Returns a clone of the value under `key` if present and fresh.
    ///
    /// A stale entry is removed on the way out. Counts as a hit or miss.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let value = self.read_fresh(key);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Peek ==
    /// Like `get`, but leaves the hit and miss counters alone.
    pub fn peek(&mut self, key: &str) -> Option<T> {
        self.read_fresh(key)
    }

    // == Delete ==
    /// Removes the entry under `key`. No-op if absent.
    pub fn delete(&mut self, key: &str) {
        self.remove_entry(key);
    }

    // == Clear All ==
    /// Removes every entry and resets write order.
    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Stats ==
    /// Returns a snapshot of occupancy and counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.size = self.entries.len();
        stats.keys = self.order.keys();
        stats
    }

    // == Sweep Expired ==
    /// Removes all entries older than the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.is_expired_at(self.ttl, now))
            .map(|entry| entry.key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove_entry(&key);
        }

        self.stats.record_expirations(count);
        count
    }

    /// Returns true if `key` has an entry, fresh or not.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    fn enforce_size_limit(&mut self) {
        while self.entries.len() > self.max_size {
            match self.order.pop_oldest() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    self.stats.record_eviction();
                    debug!(key = %oldest, "Evicted oldest cache entry");
                }
                // Order and entries always hold the same keys
                None => break,
            }
        }
    }

    fn read_fresh(&mut self, key: &str) -> Option<T> {
        let expired = self.entries.get(key)?.is_expired(self.ttl);

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            debug!(key, "Cache entry expired on read");
            return None;
        }

        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn remove_entry(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
        }
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
