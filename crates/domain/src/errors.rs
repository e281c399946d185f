//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Glucolog
///
/// The storage variants mirror how callers are expected to react:
/// initialization failures are fatal, read/write failures are recoverable at
/// the calling flow, and duplicate keys are caller logic errors that must
/// not be retried as-is.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GlucologError {
    #[error("storage initialization error: {0}")]
    StorageInit(String),

    #[error("storage read error: {0}")]
    StorageRead(String),

    #[error("storage write error: {0}")]
    StorageWrite(String),

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for Glucolog operations
pub type Result<T> = std::result::Result<T, GlucologError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = GlucologError::DuplicateKey("reading r1 already exists".into());
        assert_eq!(err.to_string(), "duplicate key: reading r1 already exists");

        let err = GlucologError::StorageInit("cannot open database".into());
        assert_eq!(err.to_string(), "storage initialization error: cannot open database");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = GlucologError::StorageWrite("disk full".into());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "StorageWrite");
        assert_eq!(json["message"], "disk full");
    }
}
