//! Storage error taxonomy shared by every query in the dao.

use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by the storage layer.
///
/// `NotFound`, `VersionConflict` and `Duplicate` are expected outcomes of the
/// optimistic-concurrency protocol; `Backend` covers everything else.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The addressed row does not exist (or is filtered out as inactive).
    #[error("{0}")]
    NotFound(String),
    /// The caller-supplied version no longer matches the stored row.
    #[error("version conflict: expected {expected}, found {actual}")]
    VersionConflict {
        /// Version the caller last observed.
        expected: i64,
        /// Version currently stored.
        actual: i64,
    },
    /// An insert collided with a uniqueness constraint.
    #[error("{0}")]
    Duplicate(String),
    /// The database failed for reasons outside the protocol.
    #[error("database failure: {message}")]
    Backend {
        /// Human-readable context for the failing operation.
        message: String,
        /// Underlying driver error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct a backend error from any driver failure.
    pub fn backend(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Backend {
            message: message.into(),
            source: Box::new(source),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::backend("query failed", err)
    }
}

/// Map an insert error, translating unique-constraint hits into [`StorageError::Duplicate`].
pub fn map_insert_error(err: sqlx::Error, duplicate_message: impl Into<String>) -> StorageError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::Duplicate(duplicate_message.into())
        }
        other => StorageError::backend("insert failed", other),
    }
}
