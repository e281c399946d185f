//! Conversions from storage errors into domain errors.
//!
//! Every repository maps engine failures through one of these helpers so
//! the direction of the failed operation (read vs write) is visible in the
//! domain error a calling flow receives. Initialization failures get their
//! own mapping because callers treat them as fatal.

use glucolog_common::storage::StorageError;
use glucolog_domain::GlucologError;
use tokio::task::JoinError;

/// Whether a rusqlite error is a unique/primary-key constraint violation.
///
/// Extended code 1555 is `SQLITE_CONSTRAINT_PRIMARYKEY`, 2067 is
/// `SQLITE_CONSTRAINT_UNIQUE`.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    use rusqlite::ffi::ErrorCode;

    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation && matches!(e.extended_code, 1555 | 2067)
        }
        _ => false,
    }
}

/// Map a storage failure during engine/schema setup. Fatal to callers.
pub fn map_init_error(err: StorageError) -> GlucologError {
    GlucologError::StorageInit(err.to_string())
}

/// Map a storage failure on a read path.
pub fn map_read_error(err: StorageError) -> GlucologError {
    GlucologError::StorageRead(err.to_string())
}

/// Map a storage failure on a write path.
///
/// Unique-constraint violations are surfaced as [`GlucologError::DuplicateKey`]
/// so callers can distinguish id collisions from engine failures.
pub fn map_write_error(err: StorageError) -> GlucologError {
    match err {
        StorageError::Rusqlite(ref sql_err) if is_unique_violation(sql_err) => {
            GlucologError::DuplicateKey(err.to_string())
        }
        other => GlucologError::StorageWrite(other.to_string()),
    }
}

/// Map a blocking-task join failure.
pub fn map_join_error(err: JoinError) -> GlucologError {
    if err.is_cancelled() {
        GlucologError::Internal("blocking repository task cancelled".into())
    } else {
        GlucologError::Internal(format!("blocking repository task failed: {err}"))
    }
}
