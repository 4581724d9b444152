//! Cache Module
//!
//! In-memory key/value cache with TTL expiry and FIFO size eviction.

mod entry;
mod key;
mod order;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use key::generate_key;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Default time-to-live for cached values
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default entry bound
pub const DEFAULT_MAX_SIZE: usize = 50;

// == Cache Config ==
/// Tuning knobs for a cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Age after which an entry is no longer served
    pub ttl: Duration,
    /// Maximum number of entries kept after any write
    pub max_size: usize,
    /// Period of the background sweep; `None` sweeps every `ttl`
    pub sweep_interval: Option<Duration>,
    /// Share one loader call between concurrent misses on the same key
    pub single_flight: bool,
}

impl CacheConfig {
    /// Effective background sweep period.
    pub fn sweep_period(&self) -> Duration {
        self.sweep_interval.unwrap_or(self.ttl)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_size: DEFAULT_MAX_SIZE,
            sweep_interval: None,
            single_flight: true,
        }
    }
}
