//! Cache Entry Module
//!
//! Defines a single stored value with its insertion timestamp.

use std::time::Duration;

use chrono::Utc;

// == Cache Entry ==
/// A stored value and the moment it was inserted.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// Derived cache key
    pub key: String,
    /// The stored value
    pub value: T,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(key: String, value: T) -> Self {
        Self {
            key,
            value,
            inserted_at: current_timestamp_ms(),
        }
    }

    // == Age ==
    /// Milliseconds elapsed between insertion and `now`.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now`.
    ///
    /// An entry expires once its age is strictly greater than `ttl`, so an
    /// entry read exactly `ttl` milliseconds after insertion is still served.
    pub fn is_expired_at(&self, ttl: Duration, now: u64) -> bool {
        u128::from(self.age_ms(now)) > ttl.as_millis()
    }

    /// Checks whether the entry is stale right now.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(ttl, current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
