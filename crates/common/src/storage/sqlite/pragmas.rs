//! SQLite pragma management.
//!
//! Applies per-connection pragmas before a connection enters the pool.

use rusqlite::Connection;

use super::config::SqlitePoolConfig;
use crate::storage::error::{StorageError, StorageResult};

/// Apply connection-level pragmas.
///
/// Every connection in the pool gets:
/// - WAL journal mode (readers never block on the single writer)
/// - NORMAL synchronous mode
/// - foreign key constraints, when enabled
/// - a busy timeout to ride out lock contention
pub fn apply_connection_pragmas(
    conn: &Connection,
    config: &SqlitePoolConfig,
) -> StorageResult<()> {
    let mut pragma_sql = String::new();

    if config.enable_wal {
        pragma_sql.push_str("PRAGMA journal_mode=WAL;\n");
        pragma_sql.push_str("PRAGMA wal_autocheckpoint=1000;\n");
    }

    pragma_sql.push_str("PRAGMA synchronous=NORMAL;\n");

    if config.enable_foreign_keys {
        pragma_sql.push_str("PRAGMA foreign_keys=ON;\n");
    }

    conn.execute_batch(&pragma_sql)
        .map_err(|e| StorageError::Query(format!("failed to apply pragmas: {e}")))?;

    // Separate call, the pragma takes a parameter
    conn.busy_timeout(config.busy_timeout)
        .map_err(|e| StorageError::Query(format!("failed to set busy timeout: {e}")))?;

    Ok(())
}
