//! Cache Statistics Module
//!
//! Occupancy snapshot plus hit, miss, eviction and expiry counters.

use serde::Serialize;

// == Cache Stats ==
/// Read-only snapshot of cache occupancy and activity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// Configured entry bound
    pub max_size: usize,
    /// Keys from oldest to newest write
    pub keys: Vec<String>,
    /// Reads that returned a value
    pub hits: u64,
    /// Reads that found nothing or a stale entry
    pub misses: u64,
    /// Entries removed to enforce `max_size`
    pub evictions: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates empty stats for a cache bounded at `max_size`.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}
