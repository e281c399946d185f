//! Pooled SQLite integration.
//!
//! r2d2-backed connection pooling over rusqlite, with per-connection pragma
//! management and the connection/statement wrappers the repositories use.

pub mod config;
pub mod connection;
pub mod pool;
pub mod pragmas;

pub use config::SqlitePoolConfig;
pub use connection::{SqliteConnection, SqliteStatement};
pub use pool::SqlitePool;
pub use pragmas::apply_connection_pragmas;
