//! Storage configuration.
//!
//! One struct covers everything the pool needs: file location, pool sizing,
//! timeouts, and per-connection pragma toggles. Constructed once at startup
//! and handed to [`crate::storage::SqlitePool`].

use std::path::PathBuf;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Database file path
    pub path: PathBuf,

    /// Connection pool size (default: 10)
    pub pool_size: u32,

    /// Connection timeout in seconds (default: 5)
    pub connection_timeout_secs: u64,

    /// Busy timeout in milliseconds (default: 5000)
    pub busy_timeout_ms: u64,

    /// Enable WAL mode (default: true)
    pub enable_wal: bool,

    /// Enable foreign keys (default: true)
    pub enable_foreign_keys: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/glucolog.db"),
            pool_size: 10,
            connection_timeout_secs: 5,
            busy_timeout_ms: 5000,
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}

impl StorageConfig {
    /// Config pointing at the given database file, defaults elsewhere.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }
}
