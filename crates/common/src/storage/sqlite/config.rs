//! SQLite connection pool configuration.

use std::time::Duration;

use crate::storage::config::StorageConfig;

/// Pool configuration
///
/// Wraps [`StorageConfig`] with r2d2-specific settings.
#[derive(Debug, Clone)]
pub struct SqlitePoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// Connection acquisition timeout
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite operations
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,

    /// Enable foreign key constraints
    pub enable_foreign_keys: bool,
}

impl From<&StorageConfig> for SqlitePoolConfig {
    fn from(config: &StorageConfig) -> Self {
        Self {
            max_size: config.pool_size,
            connection_timeout: Duration::from_secs(config.connection_timeout_secs),
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            enable_wal: config.enable_wal,
            enable_foreign_keys: config.enable_foreign_keys,
        }
    }
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}
