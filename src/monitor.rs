//! Load-Time Monitor
//!
//! Keeps the most recent load durations and reports their average.

use std::collections::VecDeque;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Number of samples kept
pub const SAMPLE_WINDOW: usize = 50;

// == Performance Monitor ==
/// Rolling window of timing samples, oldest dropped first.
#[derive(Debug, Clone, Default)]
pub struct PerformanceMonitor {
    samples: VecDeque<Duration>,
}

/// Serializable view of the monitor.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSummary {
    pub samples: usize,
    pub average_ms: f64,
    pub last_ms: Option<f64>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(SAMPLE_WINDOW),
        }
    }

    // == Record ==
    /// Records the time between `start` and `end`.
    pub fn record(&mut self, start: Instant, end: Instant) {
        self.record_duration(end.saturating_duration_since(start));
    }

    pub fn record_duration(&mut self, elapsed: Duration) {
        self.samples.push_back(elapsed);
        if self.samples.len() > SAMPLE_WINDOW {
            self.samples.pop_front();
        }
    }

    // == Average ==
    /// Mean of the kept samples; zero when empty.
    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn summary(&self) -> MonitorSummary {
        MonitorSummary {
            samples: self.samples.len(),
            average_ms: self.average().as_secs_f64() * 1000.0,
            last_ms: self.samples.back().map(|d| d.as_secs_f64() * 1000.0),
        }
    }
}

// == Timed ==
/// Awaits `fut` and returns its output with the elapsed time.
///
/// The time is measured whether the output is a success or an error.
pub async fn timed<F: Future>(fut: F) -> (F::Output, Duration) {
    let start = Instant::now();
    let output = fut.await;
    (output, start.elapsed())
}
