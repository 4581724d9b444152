//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time-to-live of cached chart data in milliseconds
    pub cache_ttl_ms: u64,
    /// Maximum number of cached chart datasets
    pub cache_max_size: usize,
    /// Background sweep interval in milliseconds; None means same as TTL
    pub sweep_interval_ms: Option<u64>,
    /// Deduplicate concurrent loads of the same chart query
    pub single_flight: bool,
    /// Simulated latency of the mock chart source in milliseconds
    pub mock_delay_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Cache TTL in milliseconds (default: 300000)
    /// - `CACHE_MAX_SIZE` - Maximum cached entries (default: 50)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: the TTL)
    /// - `SINGLE_FLIGHT` - Share loads between concurrent misses (default: true)
    /// - `MOCK_DELAY_MS` - Mock source latency in milliseconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_ms: env_or("CACHE_TTL_MS", defaults.cache_ttl_ms),
            cache_max_size: env_or("CACHE_MAX_SIZE", defaults.cache_max_size),
            sweep_interval_ms: env_parse("SWEEP_INTERVAL_MS"),
            single_flight: env_or("SINGLE_FLIGHT", defaults.single_flight),
            mock_delay_ms: env_or("MOCK_DELAY_MS", defaults.mock_delay_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Cache settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_millis(self.cache_ttl_ms),
            max_size: self.cache_max_size,
            sweep_interval: self.sweep_interval_ms.map(Duration::from_millis),
            single_flight: self.single_flight,
        }
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_ms: 5 * 60 * 1000,
            cache_max_size: 50,
            sweep_interval_ms: None,
            single_flight: true,
            mock_delay_ms: 300,
            server_port: 3000,
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env_parse(name).unwrap_or(default)
}
