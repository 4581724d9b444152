//! Chart Cache - TTL cache and cached loader for dashboard chart data
//!
//! Provides a bounded, time-expiring key/value cache with FIFO eviction, an
//! async loader wrapper with single-flight and preloading, and a small HTTP
//! service serving mock chart datasets through the cache.

pub mod api;
pub mod cache;
pub mod charts;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod monitor;
pub mod tasks;

pub use api::AppState;
pub use cache::{generate_key, CacheConfig, CacheStats, TtlCache};
pub use config::Config;
pub use error::{KeyError, LoadError, ServiceError};
pub use loader::{CachedLoader, PreloadSummary};
pub use tasks::spawn_sweep_task;
