//! Database connection manager backed by the shared SQLite pool.
//!
//! One `DbManager` is created at application startup and handed to every
//! repository by `Arc`; there is no module-level singleton. `new` plus
//! `run_migrations` together form the store's initialization step. Callers
//! must treat a failure of either as fatal and not proceed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glucolog_common::storage::{SqliteConnection, SqlitePool, SqlitePoolConfig, StorageResult};
use glucolog_domain::Result;
use rusqlite::params;
use tracing::info;

use crate::errors::{map_init_error, map_read_error};

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps a [`SqlitePool`].
pub struct DbManager {
    pool: Arc<SqlitePool>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size.
    ///
    /// Opens (creating if missing) the database file at `db_path`. Failure
    /// here means the store is unusable.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let config = SqlitePoolConfig { max_size: pool_size.max(1), ..SqlitePoolConfig::default() };

        let pool = SqlitePool::new(&path, config).map(Arc::new).map_err(map_init_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.metrics().max_pool_size(),
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &Arc<SqlitePool> {
        &self.pool
    }

    /// Acquire a connection from the pool.
    ///
    /// Storage-level result so repositories can map the failure to the
    /// direction of the operation they were about to perform.
    pub fn connection(&self) -> StorageResult<SqliteConnection> {
        self.pool.get()
    }

    /// Ensure the full schema exists on the current database.
    ///
    /// Idempotent: the schema batch is `CREATE TABLE IF NOT EXISTS`
    /// throughout, so calling this on every startup is safe.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.connection().map_err(map_init_error)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| map_init_error(e.into()))?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
            params![SCHEMA_VERSION],
        )
        .map_err(|e| map_init_error(e.into()))?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify database connectivity with a trivial query.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.connection().map_err(map_read_error)?;
        conn.query_row("SELECT 1", &[], |row| row.get::<_, i32>(0)).map_err(map_read_error)?;
        Ok(())
    }
}
