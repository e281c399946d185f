//! SQLite-backed glucose reading repository.
//!
//! Readings are append-only: a plain INSERT (never OR REPLACE) so an id
//! collision fails instead of silently overwriting a measurement, and no
//! update or delete path exists at all.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use glucolog_common::storage::error::StorageError;
use glucolog_common::storage::SqliteConnection;
use glucolog_core::records::ports::ReadingRepository as ReadingRepositoryPort;
use glucolog_domain::{GlucologError, GlucoseReading, MealContext, Result as DomainResult};
use rusqlite::{Row, ToSql};
use tokio::task;
use tracing::warn;

use super::manager::DbManager;
use crate::errors::{is_unique_violation, map_join_error, map_read_error, map_write_error};

/// SQLite implementation of `ReadingRepository`
pub struct SqliteReadingRepository {
    db: Arc<DbManager>,
}

impl SqliteReadingRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReadingRepositoryPort for SqliteReadingRepository {
    async fn add_reading(&self, reading: GlucoseReading) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.connection().map_err(map_write_error)?;

            match insert_reading(&conn, &reading) {
                Err(StorageError::Rusqlite(ref sql_err)) if is_unique_violation(sql_err) => {
                    Err(GlucologError::DuplicateKey(format!(
                        "reading {} already exists",
                        reading.id
                    )))
                }
                other => other.map_err(map_write_error),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_readings(&self) -> DomainResult<Vec<GlucoseReading>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<GlucoseReading>> {
            let conn = db.connection().map_err(map_read_error)?;
            query_readings(&conn).map_err(map_read_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

const READING_INSERT_SQL: &str = "INSERT INTO readings (
        id, measurement_time, glucose_level, meal_context, time_since_meal, notes
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const READING_LIST_SQL: &str = "SELECT id, measurement_time, glucose_level, meal_context,
        time_since_meal, notes
    FROM readings
    ORDER BY measurement_time DESC";

fn insert_reading(conn: &SqliteConnection, reading: &GlucoseReading) -> Result<(), StorageError> {
    let meal_context = reading.meal_context.map(MealContext::as_str);

    let params: [&dyn ToSql; 6] = [
        &reading.id,
        &reading.measurement_time,
        &reading.glucose_level,
        &meal_context,
        &reading.time_since_meal,
        &reading.notes,
    ];

    conn.execute(READING_INSERT_SQL, params.as_slice())?;
    Ok(())
}

fn query_readings(conn: &SqliteConnection) -> Result<Vec<GlucoseReading>, StorageError> {
    let mut stmt = conn.prepare(READING_LIST_SQL)?;
    stmt.query_map(&[], map_reading_row)
}

/// Map a row to a GlucoseReading. The field list is total: adding a column
/// to the schema requires updating this mapping.
fn map_reading_row(row: &Row<'_>) -> rusqlite::Result<GlucoseReading> {
    let id: String = row.get(0)?;
    let meal_context_raw: Option<String> = row.get(3)?;
    let meal_context = meal_context_raw.and_then(|raw| parse_meal_context(&id, &raw));

    Ok(GlucoseReading {
        id,
        measurement_time: row.get(1)?,
        glucose_level: row.get(2)?,
        meal_context,
        time_since_meal: row.get(4)?,
        notes: row.get(5)?,
    })
}

fn parse_meal_context(id: &str, raw: &str) -> Option<MealContext> {
    match MealContext::from_str(raw) {
        Ok(context) => Some(context),
        Err(err) => {
            warn!(
                reading_id = %id,
                raw_context = %raw,
                error = %err,
                "unrecognised meal context stored for reading, treating as unset"
            );
            None
        }
    }
}
