//! Mock chart source with simulated latency.

use std::time::Duration;

use rand::thread_rng;
use serde_json::Value;
use tracing::debug;

use crate::charts::{mock, ChartKind, ChartQuery};
use crate::error::{Result, ServiceError};

/// Default period for `sales_trend`
pub const DEFAULT_PERIOD: &str = "7d";

// == Mock Chart Source ==
/// Generates chart datasets after a fixed delay, standing in for a backend.
#[derive(Debug, Clone)]
pub struct MockChartSource {
    delay: Duration,
}

impl MockChartSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    // == Fetch ==
    /// Loader entry point for the chart cache.
    pub async fn fetch(&self, query: Option<ChartQuery>) -> Result<Value> {
        let query = query
            .ok_or_else(|| ServiceError::InvalidRequest("Missing chart query".to_string()))?;
        self.load(&query).await
    }

    // == Load ==
    /// Builds the dataset for `query` after the simulated delay.
    ///
    /// Unknown charts and bad parameters fail before the delay.
    pub async fn load(&self, query: &ChartQuery) -> Result<Value> {
        let kind = query.kind()?;
        let days = match kind {
            ChartKind::SalesTrend => {
                let period = query
                    .params
                    .get("period")
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_PERIOD);
                Some(mock::period_days(period)?)
            }
            _ => None,
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        debug!(chart = %kind, "Generating mock chart data");
        Ok(generate(kind, days))
    }
}

fn generate(kind: ChartKind, days: Option<i64>) -> Value {
    let mut rng = thread_rng();
    match kind {
        ChartKind::SalesTrend => mock::sales_trend(&mut rng, days.unwrap_or(7)),
        ChartKind::OrderStatus => mock::order_status(&mut rng),
        ChartKind::UserGrowth => mock::user_growth(&mut rng),
        ChartKind::CategoryDistribution => mock::category_distribution(&mut rng),
        ChartKind::Heatmap => mock::heatmap(&mut rng),
        ChartKind::RealtimeOverview => mock::realtime_overview(&mut rng),
    }
}
