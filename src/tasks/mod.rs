//! Background Tasks Module
//!
//! Contains background tasks that run alongside a cache.
//!
//! # Tasks
//! - TTL Sweep: removes expired cache entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
