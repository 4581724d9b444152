//! Loader Module
//!
//! Wraps async data loaders with a TTL cache, optional single-flight
//! deduplication of concurrent misses, and concurrent preloading.

mod cached;
mod flight;

pub use cached::{CachedLoader, PreloadSummary};
pub use flight::{FlightGroup, FlightGuard};
