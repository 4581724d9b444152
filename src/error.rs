//! Error types for the chart cache
//!
//! Cache operations themselves never fail. Errors only come from deriving a
//! key, from a wrapped loader, or from the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Key Error ==
/// Raised when request parameters cannot be serialized into a cache key.
#[derive(Error, Debug)]
#[error("Cannot derive cache key: {0}")]
pub struct KeyError(#[from] serde_json::Error);

// == Load Error ==
/// Error returned by the cached loader.
///
/// Loader failures are passed through untouched in `Loader`.
#[derive(Error, Debug)]
pub enum LoadError<E> {
    /// Parameters could not be turned into a key; the loader was not called
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The wrapped loader failed; nothing was cached
    #[error("Loader failed: {0}")]
    Loader(E),
}

impl<E> LoadError<E> {
    /// Returns the loader error, if that is what this is.
    pub fn into_loader(self) -> Option<E> {
        match self {
            LoadError::Loader(err) => Some(err),
            LoadError::Key(_) => None,
        }
    }
}

// == Service Error Enum ==
/// Errors surfaced by the HTTP service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No chart with this name
    #[error("Unknown chart: {0}")]
    UnknownChart(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Query parameters could not be keyed
    #[error(transparent)]
    Key(#[from] KeyError),
}

impl From<LoadError<ServiceError>> for ServiceError {
    fn from(err: LoadError<ServiceError>) -> Self {
        match err {
            LoadError::Key(key) => ServiceError::Key(key),
            LoadError::Loader(inner) => inner,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::UnknownChart(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidRequest(_) | ServiceError::Key(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP service.
pub type Result<T> = std::result::Result<T, ServiceError>;
