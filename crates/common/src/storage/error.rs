//! Storage error types.
//!
//! Defines the error taxonomy for the storage layer. Repositories translate
//! these into domain errors at the infrastructure boundary; the
//! [`ErrorClassification`] impl is what retry loops consult.

use thiserror::Error;

use crate::error::{ErrorClassification, ErrorSeverity};

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("database query error: {0}")]
    Query(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("database migration error: {0}")]
    Migration(String),

    #[error("database pool exhausted")]
    PoolExhausted,

    #[error("connection timeout after {0}s")]
    Timeout(u64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: i32, found: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    R2d2(#[from] r2d2::Error),
}

/// Storage result type
pub type StorageResult<T> = Result<T, StorageError>;

impl ErrorClassification for StorageError {
    /// Pool pressure, timeouts, and transient SQLite locks are worth
    /// retrying; everything else is not.
    fn is_retryable(&self) -> bool {
        match self {
            Self::PoolExhausted | Self::Timeout(_) | Self::Connection(_) => true,
            Self::Rusqlite(err) => {
                matches!(
                    err.sqlite_error_code(),
                    Some(rusqlite::ErrorCode::DatabaseBusy)
                        | Some(rusqlite::ErrorCode::DatabaseLocked)
                )
            }
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PoolExhausted | Self::Timeout(_) => ErrorSeverity::Warning,
            Self::Migration(_) | Self::SchemaVersionMismatch { .. } => ErrorSeverity::Critical,
            Self::Connection(_)
            | Self::Query(_)
            | Self::Database(_)
            | Self::InvalidConfig(_)
            | Self::Io(_)
            | Self::Rusqlite(_)
            | Self::R2d2(_) => ErrorSeverity::Error,
        }
    }
}
