//! Error types for the property cache
//!
//! One enum per failure domain: the record store, the cache store, and the
//! HTTP surface that maps both onto status codes.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error ==
/// Failures of the record store. These are always surfaced to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Store unreachable, erroring, or timed out
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// No record with the given id
    #[error("Property not found: {0}")]
    NotFound(u64),

    /// Rejected field values
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// == Cache Error ==
/// Failures of the cache store. The caching layer swallows these and degrades.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Cache store unreachable or erroring
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Cache call exceeded its deadline
    #[error("Cache call timed out after {0:?}")]
    Timeout(Duration),

    /// Cached payload could not be encoded or decoded
    #[error("Cache serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == API Error ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed request body or parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
