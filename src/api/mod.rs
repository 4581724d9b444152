//! API Module
//!
//! HTTP handlers and routing for the chart service.
//!
//! # Endpoints
//! - `GET /charts/:name` - Chart dataset, served through the cache
//! - `DELETE /charts/:name` - Invalidate one cached dataset
//! - `POST /charts/preload` - Warm the cache for a list of queries
//! - `DELETE /cache` - Clear the cache
//! - `GET /cache/stats` - Cache statistics and load times
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
