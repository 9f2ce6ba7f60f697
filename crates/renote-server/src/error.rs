//! Error handling and status mapping for the REST surface.
//!
//! Workspace errors are classified once by
//! [`ErrorCategory`](renote_core::ErrorCategory); this module only decides
//! which HTTP status each category becomes.

use hyper::StatusCode;
use renote_core::{ErrorCategory, WorkspaceError};
use thiserror::Error;

/// Errors a request can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The workspace operation failed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Request body is not the expected JSON.
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Path segment where an id was expected is not a number.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// Request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[from] hyper::Error),

    /// No route for this path.
    #[error("not found")]
    RouteNotFound,

    /// Route exists but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The blocking worker running the operation panicked or was cancelled.
    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Workspace(e) => category_to_status(e.category()),
            ApiError::InvalidJson(_) | ApiError::InvalidId(_) | ApiError::Body(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Map an error category to an HTTP status.
pub fn category_to_status(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Conflict => StatusCode::CONFLICT,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;
