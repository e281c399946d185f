//! SQLite-backed user profile repository.
//!
//! The profile is a singleton row; upsert fully replaces the row keyed by
//! id and re-reads it inside the same transaction so the returned value is
//! what the engine actually stored, not an echo of the input.

use std::sync::Arc;

use async_trait::async_trait;
use glucolog_common::storage::error::StorageError;
use glucolog_common::storage::SqliteConnection;
use glucolog_core::records::ports::ProfileRepository as ProfileRepositoryPort;
use glucolog_domain::{Result as DomainResult, UserProfile};
use rusqlite::{Row, ToSql};
use tokio::task;

use super::manager::DbManager;
use crate::errors::{map_join_error, map_read_error, map_write_error};

/// SQLite implementation of `ProfileRepository`
pub struct SqliteProfileRepository {
    db: Arc<DbManager>,
}

impl SqliteProfileRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepositoryPort for SqliteProfileRepository {
    async fn get_profile(&self) -> DomainResult<Option<UserProfile>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<UserProfile>> {
            let conn = db.connection().map_err(map_read_error)?;

            let result = conn.query_row(PROFILE_SELECT_SQL, &[], map_profile_row);

            match result {
                Ok(profile) => Ok(Some(profile)),
                Err(StorageError::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => Ok(None),
                Err(err) => Err(map_read_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert_profile(&self, profile: UserProfile) -> DomainResult<UserProfile> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<UserProfile> {
            let mut conn = db.connection().map_err(map_write_error)?;
            replace_and_reread(&mut conn, &profile).map_err(map_write_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

const PROFILE_SELECT_SQL: &str = "SELECT id, full_name, email, google_id, onboarding_completed,
        biometric_enabled, weight, height, birth_date, diabetes_condition,
        restriction, updated_at, pending_sync
 FROM users
 LIMIT 1";

const PROFILE_SELECT_BY_ID_SQL: &str =
    "SELECT id, full_name, email, google_id, onboarding_completed,
        biometric_enabled, weight, height, birth_date, diabetes_condition,
        restriction, updated_at, pending_sync
 FROM users WHERE id = ?1";

const PROFILE_UPSERT_SQL: &str = "INSERT OR REPLACE INTO users (
        id, full_name, email, google_id, onboarding_completed, biometric_enabled,
        weight, height, birth_date, diabetes_condition, restriction, updated_at,
        pending_sync
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

/// Replace the profile row and read it back in one transaction.
fn replace_and_reread(
    conn: &mut SqliteConnection,
    profile: &UserProfile,
) -> Result<UserProfile, StorageError> {
    let onboarding_completed = bool_to_int(profile.onboarding_completed);
    let biometric_enabled = bool_to_int(profile.biometric_enabled);
    let pending_sync = bool_to_int(profile.pending_sync);

    let params: [&dyn ToSql; 13] = [
        &profile.id,
        &profile.full_name,
        &profile.email,
        &profile.google_id,
        &onboarding_completed,
        &biometric_enabled,
        &profile.weight_kg,
        &profile.height_cm,
        &profile.birth_date,
        &profile.condition,
        &profile.restriction,
        &profile.updated_at,
        &pending_sync,
    ];

    let tx = conn.transaction()?;
    tx.execute(PROFILE_UPSERT_SQL, params.as_slice())?;
    let id_param: [&dyn ToSql; 1] = [&profile.id];
    let stored = tx.query_row(PROFILE_SELECT_BY_ID_SQL, id_param.as_slice(), map_profile_row)?;
    tx.commit()?;

    Ok(stored)
}

/// Map a row to a UserProfile. The field list is total: adding a column to
/// the schema requires updating this mapping.
fn map_profile_row(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        google_id: row.get(3)?,
        onboarding_completed: int_to_bool(row.get(4)?),
        biometric_enabled: int_to_bool(row.get(5)?),
        weight_kg: row.get(6)?,
        height_cm: row.get(7)?,
        birth_date: row.get(8)?,
        condition: row.get(9)?,
        restriction: row.get(10)?,
        updated_at: row.get(11)?,
        pending_sync: int_to_bool(row.get(12)?),
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64) -> bool {
    value != 0
}
