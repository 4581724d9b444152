//! Request DTOs for the chart service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::charts::{ChartKind, ChartQuery};

/// Upper bound on queries accepted in one preload call
pub const MAX_PRELOAD_REQUESTS: usize = 100;

/// Request body for POST /charts/preload
#[derive(Debug, Clone, Deserialize)]
pub struct PreloadRequest {
    /// Chart queries to warm
    pub requests: Vec<ChartQuery>,
}

impl PreloadRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    /// Individual bad queries are not rejected here; they count as failed
    /// preloads.
    pub fn validate(&self) -> Option<String> {
        if self.requests.is_empty() {
            return Some("Preload requires at least one chart request".to_string());
        }
        if self.requests.len() > MAX_PRELOAD_REQUESTS {
            return Some(format!(
                "Preload accepts at most {} chart requests",
                MAX_PRELOAD_REQUESTS
            ));
        }
        None
    }

    /// Number of queries naming a chart that exists.
    pub fn known_charts(&self) -> usize {
        self.requests
            .iter()
            .filter(|query| query.chart.parse::<ChartKind>().is_ok())
            .count()
    }
}
