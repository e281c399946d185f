//! Health record service - core business logic
//!
//! The single component owning profile and reading access. Constructed once
//! at application startup with the repository handles and passed by
//! reference to every collaborator that needs persistence; there is no
//! hidden global database state.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use glucolog_domain::{GlucologError, GlucoseReading, Result, UserProfile};
use tracing::debug;

use super::ports::{ProfileRepository, ReadingRepository};

/// Health record service
///
/// No in-memory cache is maintained: every call goes to the engine, so
/// callers needing repeated access cache at their own layer.
pub struct HealthRecordService {
    profiles: Arc<dyn ProfileRepository>,
    readings: Arc<dyn ReadingRepository>,
}

impl HealthRecordService {
    /// Create a new service over the given repositories
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        readings: Arc<dyn ReadingRepository>,
    ) -> Self {
        Self { profiles, readings }
    }

    /// Get the device's profile, or `None` before onboarding has created one
    pub async fn get_profile(&self) -> Result<Option<UserProfile>> {
        self.profiles.get_profile().await
    }

    /// Insert or fully replace the profile row.
    ///
    /// `updated_at` is stamped here on every mutation; the caller's value is
    /// ignored. `pending_sync` is persisted exactly as supplied: the
    /// profile-editing flow passes `true`, a sync collaborator confirms a
    /// push by upserting with `false`. Returns the re-read row.
    pub async fn upsert_profile(&self, mut profile: UserProfile) -> Result<UserProfile> {
        if profile.id.trim().is_empty() {
            return Err(GlucologError::StorageWrite("profile id must not be empty".into()));
        }

        profile.updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        debug!(profile_id = %profile.id, pending_sync = profile.pending_sync, "upserting profile");
        self.profiles.upsert_profile(profile).await
    }

    /// Append one immutable reading.
    ///
    /// The store rejects non-finite glucose values; range validation is the
    /// measurement-entry flow's responsibility. Duplicate ids surface as
    /// [`GlucologError::DuplicateKey`] so the caller can regenerate the id
    /// and retry.
    pub async fn add_reading(&self, reading: GlucoseReading) -> Result<()> {
        if reading.id.trim().is_empty() {
            return Err(GlucologError::StorageWrite("reading id must not be empty".into()));
        }
        if !reading.glucose_level.is_finite() {
            return Err(GlucologError::StorageWrite(format!(
                "glucose level must be a finite number, got {}",
                reading.glucose_level
            )));
        }

        debug!(reading_id = %reading.id, "adding reading");
        self.readings.add_reading(reading).await
    }

    /// All readings, most recent `measurement_time` first
    pub async fn list_readings(&self) -> Result<Vec<GlucoseReading>> {
        self.readings.list_readings().await
    }
}
