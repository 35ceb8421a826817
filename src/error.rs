//! Error tiers: storage failures bubble up as [`ServiceError`]s, which the
//! route layer converts into [`AppError`] HTTP responses.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Requested record is absent or filtered out as inactive.
    #[error("not found: {0}")]
    NotFound(String),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation is not allowed in the record's current state.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Write raced another client or collides with an existing record.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Persistence layer failed in an unexpected way.
    #[error("storage failure")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(message) => ServiceError::NotFound(message),
            StorageError::VersionConflict { .. } => ServiceError::Conflict(
                "Record has been modified. Please refresh and try again.".into(),
            ),
            StorageError::Duplicate(message) => ServiceError::Conflict(message),
            other => ServiceError::Storage(other),
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Operation rejected for the resource's current state.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::Forbidden(message) => AppError::Forbidden(message),
            ServiceError::Conflict(message) => AppError::Conflict(message),
            ServiceError::Storage(source) => AppError::Internal(source.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_conflict_maps_to_conflict() {
        let err = ServiceError::from(StorageError::VersionConflict {
            expected: 2,
            actual: 3,
        });
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn storage_not_found_keeps_its_message() {
        let err = ServiceError::from(StorageError::NotFound("team 7 not found".into()));
        match err {
            ServiceError::NotFound(message) => assert_eq!(message, "team 7 not found"),
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
