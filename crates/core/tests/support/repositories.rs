//! Mock repository implementations for testing
//!
//! In-memory mocks for the record-store ports, enabling deterministic
//! service tests without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use glucolog_core::records::ports::{ProfileRepository, ReadingRepository};
use glucolog_domain::{GlucologError, GlucoseReading, Result as DomainResult, UserProfile};

/// In-memory mock for `ProfileRepository`.
///
/// Holds at most one profile, mirroring the singleton-row invariant of the
/// real store.
#[derive(Default)]
pub struct MockProfileRepository {
    profile: Mutex<Option<UserProfile>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn get_profile(&self) -> DomainResult<Option<UserProfile>> {
        let guard = self.profile.lock().map_err(|e| GlucologError::Internal(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn upsert_profile(&self, profile: UserProfile) -> DomainResult<UserProfile> {
        let mut guard = self.profile.lock().map_err(|e| GlucologError::Internal(e.to_string()))?;
        *guard = Some(profile.clone());
        Ok(profile)
    }
}

/// In-memory mock for `ReadingRepository`.
///
/// Enforces id uniqueness and returns listings newest-first, matching the
/// contract of the SQLite implementation.
#[derive(Default)]
pub struct MockReadingRepository {
    readings: Mutex<Vec<GlucoseReading>>,
}

impl MockReadingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadingRepository for MockReadingRepository {
    async fn add_reading(&self, reading: GlucoseReading) -> DomainResult<()> {
        let mut guard = self.readings.lock().map_err(|e| GlucologError::Internal(e.to_string()))?;
        if guard.iter().any(|existing| existing.id == reading.id) {
            return Err(GlucologError::DuplicateKey(format!(
                "reading {} already exists",
                reading.id
            )));
        }
        guard.push(reading);
        Ok(())
    }

    async fn list_readings(&self) -> DomainResult<Vec<GlucoseReading>> {
        let guard = self.readings.lock().map_err(|e| GlucologError::Internal(e.to_string()))?;
        let mut readings = guard.clone();
        readings.sort_by(|a, b| b.measurement_time.cmp(&a.measurement_time));
        Ok(readings)
    }
}
