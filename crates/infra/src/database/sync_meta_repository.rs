//! SQLite-backed sync checkpoint store.
//!
//! `sync_meta` is a reserved key-value table: a future remote-sync
//! collaborator records its checkpoints here. No reconciliation logic lives
//! in this crate; the repository is a plain get/put.

use std::sync::Arc;

use async_trait::async_trait;
use glucolog_common::storage::error::StorageError;
use glucolog_core::records::ports::SyncMetaRepository as SyncMetaRepositoryPort;
use glucolog_domain::Result as DomainResult;
use rusqlite::ToSql;
use tokio::task;

use super::manager::DbManager;
use crate::errors::{map_join_error, map_read_error, map_write_error};

/// SQLite implementation of `SyncMetaRepository`
pub struct SqliteSyncMetaRepository {
    db: Arc<DbManager>,
}

impl SqliteSyncMetaRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SyncMetaRepositoryPort for SqliteSyncMetaRepository {
    async fn get_checkpoint(&self, key: &str) -> DomainResult<Option<String>> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<String>> {
            let conn = db.connection().map_err(map_read_error)?;

            let params: [&dyn ToSql; 1] = [&key];
            let result = conn.query_row(
                "SELECT value FROM sync_meta WHERE key = ?1",
                params.as_slice(),
                |row| row.get(0),
            );

            match result {
                Ok(value) => Ok(value),
                Err(StorageError::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => Ok(None),
                Err(err) => Err(map_read_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn put_checkpoint(&self, key: &str, value: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();
        let value = value.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.connection().map_err(map_write_error)?;

            let params: [&dyn ToSql; 2] = [&key, &value];
            conn.execute(
                "INSERT INTO sync_meta (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params.as_slice(),
            )
            .map_err(map_write_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
