//! Charts Module
//!
//! Chart dataset names, query shape, and the mock source that generates
//! datasets with simulated backend latency.

mod mock;
mod source;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

pub use source::MockChartSource;

// == Chart Kind ==
/// Datasets the source knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SalesTrend,
    OrderStatus,
    UserGrowth,
    CategoryDistribution,
    Heatmap,
    RealtimeOverview,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::SalesTrend,
        ChartKind::OrderStatus,
        ChartKind::UserGrowth,
        ChartKind::CategoryDistribution,
        ChartKind::Heatmap,
        ChartKind::RealtimeOverview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::SalesTrend => "sales_trend",
            ChartKind::OrderStatus => "order_status",
            ChartKind::UserGrowth => "user_growth",
            ChartKind::CategoryDistribution => "category_distribution",
            ChartKind::Heatmap => "heatmap",
            ChartKind::RealtimeOverview => "realtime_overview",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ServiceError::UnknownChart(s.to_string()))
    }
}

// == Chart Query ==
/// One chart request: its name plus string parameters.
///
/// This is the value keyed by the chart cache, so two queries with the same
/// chart and parameters share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartQuery {
    pub chart: String,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl ChartQuery {
    pub fn new(chart: impl Into<String>) -> Self {
        Self {
            chart: chart.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn kind(&self) -> Result<ChartKind, ServiceError> {
        self.chart.parse()
    }
}
