//! Request and Response models for the chart service API
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PreloadRequest, MAX_PRELOAD_REQUESTS};
pub use responses::{
    ApiResponse, ClearResponse, ErrorResponse, HealthResponse, InvalidateResponse, StatsResponse,
};
