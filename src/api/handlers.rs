//! API Handlers
//!
//! HTTP request handlers for each chart service endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::charts::{ChartKind, ChartQuery, MockChartSource};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::loader::{CachedLoader, PreloadSummary};
use crate::models::{
    ApiResponse, ClearResponse, HealthResponse, InvalidateResponse, PreloadRequest, StatsResponse,
};
use crate::monitor::{timed, PerformanceMonitor};

/// Key prefix for every cached chart dataset
pub const CHART_CACHE_PREFIX: &str = "charts";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached front-end over the chart source
    pub charts: Arc<CachedLoader<Value>>,
    /// Where datasets come from on a cache miss
    pub source: Arc<MockChartSource>,
    /// Latency of chart requests through the cache
    pub monitor: Arc<RwLock<PerformanceMonitor>>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(charts: CachedLoader<Value>, source: MockChartSource) -> Self {
        Self {
            charts: Arc::new(charts),
            source: Arc::new(source),
            monitor: Arc::new(RwLock::new(PerformanceMonitor::new())),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts the cache sweep task, so it must run inside a tokio runtime.
    pub fn from_config(config: &Config) -> Self {
        let charts = CachedLoader::new(CHART_CACHE_PREFIX, &config.cache_config());
        let source = MockChartSource::new(config.mock_delay());
        Self::new(charts, source)
    }
}

/// Splits the `refresh` flag off the query string.
fn take_refresh_flag(params: &mut BTreeMap<String, String>) -> bool {
    params
        .remove("refresh")
        .is_some_and(|v| v == "true" || v == "1")
}

/// Handler for GET /charts/:name
///
/// Serves the chart from cache, loading it from the source on a miss.
/// `?refresh=true` forces a reload.
pub async fn get_chart_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(mut params): Query<BTreeMap<String, String>>,
) -> Result<Json<ApiResponse<Value>>> {
    // Reject unknown charts before touching the cache
    let kind: ChartKind = name.parse()?;
    let refresh = take_refresh_flag(&mut params);
    let query = ChartQuery {
        chart: name,
        params,
    };

    let source = &state.source;
    let load = move |q: Option<ChartQuery>| source.fetch(q);
    let (result, elapsed) = if refresh {
        timed(state.charts.refresh(load, Some(query))).await
    } else {
        timed(state.charts.with_cache(load, Some(query))).await
    };
    state.monitor.write().await.record_duration(elapsed);

    let data = result?;
    debug!(chart = %kind, refresh, elapsed_ms = elapsed.as_millis() as u64, "Served chart");
    Ok(Json(ApiResponse::success(data)))
}

/// Handler for POST /charts/preload
///
/// Warms the cache for every listed query. Always succeeds once the body
/// validates; per-query failures are counted in the response.
pub async fn preload_handler(
    State(state): State<AppState>,
    Json(req): Json<PreloadRequest>,
) -> Result<Json<PreloadSummary>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }
    debug!(
        requested = req.requests.len(),
        known = req.known_charts(),
        "Preloading charts"
    );

    let source = &state.source;
    let summary = state
        .charts
        .preload(move |q: Option<ChartQuery>| source.fetch(q), req.requests)
        .await;

    Ok(Json(summary))
}

/// Handler for DELETE /charts/:name
///
/// Drops the cached dataset for this chart and query string. The key is
/// derived exactly as GET derives it.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(mut params): Query<BTreeMap<String, String>>,
) -> Result<Json<InvalidateResponse>> {
    let kind: ChartKind = name.parse()?;
    take_refresh_flag(&mut params);
    let query = ChartQuery {
        chart: name,
        params,
    };

    let key = state.charts.invalidate(Some(&query)).await?;
    debug!(chart = %kind, key = %key, "Invalidated chart");

    Ok(Json(InvalidateResponse::new(key)))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.charts.stats().await.size;
    state.charts.clear_all().await;
    info!(cleared, "Chart cache cleared");

    Json(ClearResponse::new(cleared))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.charts.stats().await;
    let load_times = state.monitor.read().await.summary();

    Json(StatsResponse::new(cache, load_times))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
