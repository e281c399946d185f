//! Core storage types shared across the storage layer.

use rusqlite::{Row, ToSql, Transaction as RusqliteTransaction};

use super::error::{StorageError, StorageResult};

/// Transaction wrapper.
///
/// Rolls back automatically on drop unless committed, so an abandoned caller
/// can never leave a half-applied write behind.
pub struct Transaction<'conn> {
    inner: Option<RusqliteTransaction<'conn>>,
}

impl<'conn> Transaction<'conn> {
    /// Wrap a rusqlite transaction
    pub fn new(transaction: RusqliteTransaction<'conn>) -> Self {
        Self { inner: Some(transaction) }
    }

    /// Commit the transaction
    pub fn commit(mut self) -> StorageResult<()> {
        if let Some(tx) = self.inner.take() {
            tx.commit().map_err(StorageError::from)
        } else {
            Err(StorageError::Query("transaction already consumed".to_string()))
        }
    }

    /// Roll the transaction back explicitly
    pub fn rollback(mut self) -> StorageResult<()> {
        if let Some(tx) = self.inner.take() {
            tx.rollback().map_err(StorageError::from)
        } else {
            Err(StorageError::Query("transaction already consumed".to_string()))
        }
    }

    /// Execute a statement within the transaction
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> StorageResult<usize> {
        if let Some(ref tx) = self.inner {
            tx.execute(sql, params).map_err(StorageError::from)
        } else {
            Err(StorageError::Query("transaction already consumed".to_string()))
        }
    }

    /// Run a query that returns a single row within the transaction
    pub fn query_row<T, F>(&self, sql: &str, params: &[&dyn ToSql], f: F) -> StorageResult<T>
    where
        F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        if let Some(ref tx) = self.inner {
            tx.query_row(sql, params, f).map_err(StorageError::from)
        } else {
            Err(StorageError::Query("transaction already consumed".to_string()))
        }
    }
}

impl<'conn> Drop for Transaction<'conn> {
    fn drop(&mut self) {
        if let Some(tx) = self.inner.take() {
            // Auto-rollback on drop
            let _ = tx.rollback();
        }
    }
}

/// Health status of the storage system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub healthy: bool,

    /// Number of active connections
    pub active_connections: usize,

    /// Number of idle connections
    pub idle_connections: usize,

    /// Maximum pool size
    pub max_connections: usize,

    /// Optional error message if unhealthy
    pub message: Option<String>,
}

impl HealthStatus {
    /// Create a healthy status
    pub fn healthy(active: usize, idle: usize, max: usize) -> Self {
        Self {
            healthy: true,
            active_connections: active,
            idle_connections: idle,
            max_connections: max,
            message: None,
        }
    }

    /// Create an unhealthy status
    pub fn unhealthy(message: String) -> Self {
        Self {
            healthy: false,
            active_connections: 0,
            idle_connections: 0,
            max_connections: 0,
            message: Some(message),
        }
    }
}

/// Snapshot of connection pool metrics
#[derive(Debug, Clone, Default)]
pub struct PoolMetrics {
    /// Total connections acquired
    pub connections_acquired: u64,

    /// Total connection timeouts
    pub connections_timeout: u64,

    /// Total connection errors
    pub connections_error: u64,

    /// Average connection acquisition time (milliseconds)
    pub avg_acquisition_time_ms: u64,
}
