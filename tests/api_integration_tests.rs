//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chart_cache::{
    api::create_router, charts::MockChartSource, AppState, CacheConfig, CachedLoader,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(test_state())
}

fn test_state() -> AppState {
    AppState::new(
        CachedLoader::new("charts", &CacheConfig::default()),
        MockChartSource::new(Duration::ZERO),
    )
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn preload(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/charts/preload")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// == Chart Endpoint Tests ==

#[tokio::test]
async fn test_chart_endpoint_envelope() {
    let app = create_test_app();

    let response = app.oneshot(get("/charts/sales_trend?period=30d")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["code"], 200);
    assert_eq!(json["message"], "success");
    assert_eq!(json["data"]["categories"].as_array().unwrap().len(), 30);
    assert!(json["timestamp"].is_i64());
}

#[tokio::test]
async fn test_chart_served_from_cache() {
    let app = create_test_app();

    let first = app.clone().oneshot(get("/charts/heatmap")).await.unwrap();
    let first = body_to_json(first.into_body()).await;
    let second = app.oneshot(get("/charts/heatmap")).await.unwrap();
    let second = body_to_json(second.into_body()).await;

    assert_eq!(first["data"], second["data"]);
}

#[tokio::test]
async fn test_query_order_does_not_split_cache() {
    let app = create_test_app();

    app.clone()
        .oneshot(get("/charts/sales_trend?period=7d&region=eu"))
        .await
        .unwrap();
    app.clone()
        .oneshot(get("/charts/sales_trend?region=eu&period=7d"))
        .await
        .unwrap();

    let stats = app.oneshot(get("/cache/stats")).await.unwrap();
    let stats = body_to_json(stats.into_body()).await;
    assert_eq!(stats["cache"]["size"], 1);
    assert_eq!(stats["cache"]["hits"], 1);
}

#[tokio::test]
async fn test_refresh_reloads_chart() {
    let state = test_state();
    let app = create_router(state.clone());

    app.clone().oneshot(get("/charts/order_status")).await.unwrap();
    let response = app
        .oneshot(get("/charts/order_status?refresh=true"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // The refresh flag is not part of the key
    let stats = state.charts.stats().await;
    assert_eq!(stats.size, 1);
    assert_eq!(stats.hits, 0);
}

#[tokio::test]
async fn test_unknown_chart_returns_404() {
    let app = create_test_app();

    let response = app.oneshot(get("/charts/radar")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("radar"));
}

#[tokio::test]
async fn test_bad_period_returns_400() {
    let app = create_test_app();

    let response = app
        .oneshot(get("/charts/sales_trend?period=1y"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Invalidation Tests ==

#[tokio::test]
async fn test_invalidate_chart() {
    let state = test_state();
    let app = create_router(state.clone());

    app.clone()
        .oneshot(get("/charts/user_growth"))
        .await
        .unwrap();
    let response = app.oneshot(delete("/charts/user_growth")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["key"].as_str().unwrap().starts_with("charts_"));
    assert_eq!(state.charts.stats().await.size, 0);
}

#[tokio::test]
async fn test_invalidate_unknown_chart_returns_404() {
    let app = create_test_app();

    let response = app.oneshot(delete("/charts/radar")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalidate_with_refresh_flag_drops_cached_chart() {
    let state = test_state();
    let app = create_router(state.clone());

    app.clone()
        .oneshot(get("/charts/sales_trend?period=30d"))
        .await
        .unwrap();
    let response = app
        .oneshot(delete("/charts/sales_trend?period=30d&refresh=true"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.charts.stats().await.size, 0);
}

#[tokio::test]
async fn test_clear_cache() {
    let app = create_test_app();

    app.clone().oneshot(get("/charts/heatmap")).await.unwrap();
    app.clone()
        .oneshot(get("/charts/category_distribution"))
        .await
        .unwrap();
    let response = app.clone().oneshot(delete("/cache")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cleared"], 2);

    let stats = app.oneshot(get("/cache/stats")).await.unwrap();
    let stats = body_to_json(stats.into_body()).await;
    assert_eq!(stats["cache"]["size"], 0);
}

// == Preload Tests ==

#[tokio::test]
async fn test_preload_counts_failures() {
    let state = test_state();
    let app = create_router(state.clone());

    let response = app
        .oneshot(preload(
            r#"{"requests":[
                {"chart":"sales_trend","params":{"period":"90d"}},
                {"chart":"radar"},
                {"chart":"realtime_overview"}
            ]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["loaded"], 2);
    assert_eq!(json["failed"], 1);
    assert_eq!(state.charts.stats().await.size, 2);
}

#[tokio::test]
async fn test_preloaded_chart_is_a_hit() {
    let state = test_state();
    let app = create_router(state.clone());

    app.clone()
        .oneshot(preload(r#"{"requests":[{"chart":"heatmap"}]}"#))
        .await
        .unwrap();
    app.oneshot(get("/charts/heatmap")).await.unwrap();

    assert_eq!(state.charts.stats().await.hits, 1);
}

#[tokio::test]
async fn test_preload_empty_returns_400() {
    let app = create_test_app();

    let response = app.oneshot(preload(r#"{"requests":[]}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Stats and Health Tests ==

#[tokio::test]
async fn test_stats_report_load_times() {
    let app = create_test_app();

    app.clone().oneshot(get("/charts/heatmap")).await.unwrap();
    let response = app.oneshot(get("/cache/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cache"]["max_size"], 50);
    assert_eq!(json["cache"]["misses"], 1);
    assert_eq!(json["load_times"]["samples"], 1);
    assert!(json["hit_rate"].is_f64());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
