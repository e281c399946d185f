//! SQLite connection pool.
//!
//! r2d2-based pooling over rusqlite. The pool applies per-connection pragmas
//! on initialisation, verifies the database opens before handing the pool
//! out, and tracks acquisition metrics.

use std::path::Path;
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, instrument, warn};

use super::config::SqlitePoolConfig;
use super::connection::SqliteConnection;
use super::pragmas::apply_connection_pragmas;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::metrics::StorageMetrics;
use crate::storage::types::{HealthStatus, PoolMetrics};

/// SQLite connection pool
///
/// Manages a pool of SQLite connections using r2d2. WAL mode keeps readers
/// concurrent with the single writer; the pool's connection timeout bounds
/// how long a caller waits under contention.
#[derive(Debug)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlitePoolConfig,
    metrics: Arc<StorageMetrics>,
}

impl SqlitePool {
    /// Create a new connection pool for the database at `path`.
    ///
    /// The file (and parent-relative path) is created on first open. A test
    /// connection is acquired up front so a broken database file fails here
    /// rather than on first use.
    ///
    /// # Errors
    /// Returns an error if the database file can't be opened or the pool
    /// can't be built.
    #[instrument(fields(db_path = ?path, pool_size = config.max_size))]
    pub fn new(path: &Path, config: SqlitePoolConfig) -> StorageResult<Self> {
        info!("creating sqlite connection pool");

        let metrics = Arc::new(StorageMetrics::new(config.max_size));

        let pool_config = config.clone();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            apply_connection_pragmas(conn, &pool_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

            Ok(())
        });

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!("failed to create connection pool: {e}");
                StorageError::Connection(format!("failed to create pool: {e}"))
            })?;

        // Smoke-test a connection so a corrupt file surfaces at startup
        {
            let conn = pool.get().map_err(|e| {
                warn!("failed to get test connection: {e}");
                StorageError::Connection(format!("failed to get test connection: {e}"))
            })?;
            conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
                .map_err(StorageError::from)?;
            debug!("test connection verified");
        }

        info!("sqlite pool created with {} connections", config.max_size);

        Ok(Self { pool, config, metrics })
    }

    /// Get a connection from the pool.
    ///
    /// Blocks up to the configured connection timeout when the pool is
    /// exhausted.
    #[instrument(skip(self), fields(pool_size = self.config.max_size))]
    pub fn get(&self) -> StorageResult<SqliteConnection> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                self.metrics.record_connection_acquired(duration_ms);

                debug!("connection acquired in {duration_ms}ms");

                Ok(SqliteConnection::new(conn))
            }
            Err(e) => {
                let err_str = e.to_string().to_lowercase();

                if err_str.contains("timeout") {
                    self.metrics.record_connection_timeout();
                    warn!("connection timeout after {:?}", self.config.connection_timeout);
                    Err(StorageError::Timeout(self.config.connection_timeout.as_secs()))
                } else {
                    self.metrics.record_connection_error();
                    warn!("connection error: {e}");
                    Err(StorageError::Connection(format!("failed to get connection: {e}")))
                }
            }
        }
    }

    /// Check pool health by acquiring a connection.
    pub fn health_check(&self) -> StorageResult<HealthStatus> {
        let state = self.pool.state();

        match self.pool.get() {
            Ok(_conn) => Ok(HealthStatus::healthy(
                state.connections as usize,
                state.idle_connections as usize,
                self.config.max_size as usize,
            )),
            Err(e) => Ok(HealthStatus::unhealthy(format!("pool unhealthy: {e}"))),
        }
    }

    /// Borrow the live metrics counters.
    pub fn metrics(&self) -> &Arc<StorageMetrics> {
        &self.metrics
    }

    /// Snapshot the pool metrics.
    pub fn metrics_snapshot(&self) -> PoolMetrics {
        PoolMetrics {
            connections_acquired: self
                .metrics
                .connections_acquired
                .load(std::sync::atomic::Ordering::Relaxed),
            connections_timeout: self
                .metrics
                .connections_timeout
                .load(std::sync::atomic::Ordering::Relaxed),
            connections_error: self
                .metrics
                .connections_error
                .load(std::sync::atomic::Ordering::Relaxed),
            avg_acquisition_time_ms: self.metrics.avg_connection_time_ms(),
        }
    }
}
