//! Response DTOs for the chart service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::monitor::MonitorSummary;

/// Envelope for chart data (GET /charts/:name)
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Status code mirrored in the body
    pub code: u16,
    pub message: String,
    pub data: T,
    /// Unix milliseconds when the response was built
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a success envelope
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Response body for DELETE /charts/:name
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    /// The cache key that was dropped
    pub key: String,
}

impl InvalidateResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' invalidated", key),
            key,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Entries held before clearing
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cache entries", cleared),
            cleared,
        }
    }
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: CacheStats,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// Request latency as seen through the cache
    pub load_times: MonitorSummary,
}

impl StatsResponse {
    pub fn new(cache: CacheStats, load_times: MonitorSummary) -> Self {
        Self {
            hit_rate: cache.hit_rate(),
            cache,
            load_times,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::PerformanceMonitor;
    use serde_json::json;

    #[test]
    fn test_api_response_envelope() {
        let resp = ApiResponse::success(json!([1, 2, 3]));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["code"], 200);
        assert_eq!(value["message"], "success");
        assert_eq!(value["data"], json!([1, 2, 3]));
        assert!(value["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse::new("charts_x");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("charts_x"));
        assert!(json.contains("invalidated"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let mut cache = CacheStats::new(50);
        cache.hits = 3;
        cache.misses = 1;
        let resp = StatsResponse::new(cache, PerformanceMonitor::new().summary());
        assert!((resp.hit_rate - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
