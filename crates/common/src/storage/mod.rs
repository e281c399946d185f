//! Storage primitives for the on-device database.
//!
//! This module provides the generic storage infrastructure the rest of the
//! workspace builds on: the pooled SQLite integration, configuration, error
//! taxonomy, and core storage types.

pub mod config;
pub mod error;
pub mod metrics;
pub mod sqlite;
pub mod types;

// Re-export commonly used types
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use metrics::StorageMetrics;
pub use sqlite::{apply_connection_pragmas, SqliteConnection, SqlitePool, SqlitePoolConfig};
pub use types::{HealthStatus, PoolMetrics, Transaction};
