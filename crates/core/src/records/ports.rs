//! Port interfaces for the health record store
//!
//! These traits define the boundaries between core business logic and the
//! infrastructure implementations backed by the on-device database.

use async_trait::async_trait;
use glucolog_domain::{GlucoseReading, Result, UserProfile};

/// Persistence for the singleton user profile
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get the single profile row, or `None` when no profile exists yet
    async fn get_profile(&self) -> Result<Option<UserProfile>>;

    /// Insert or fully replace the row keyed by `profile.id`, returning the
    /// freshly re-read row so normalized fields are authoritative
    async fn upsert_profile(&self, profile: UserProfile) -> Result<UserProfile>;
}

/// Append/list persistence for immutable glucose readings
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Insert a new reading; duplicate ids fail with
    /// [`glucolog_domain::GlucologError::DuplicateKey`]
    async fn add_reading(&self, reading: GlucoseReading) -> Result<()>;

    /// All readings ordered by `measurement_time` descending; empty when
    /// none exist
    async fn list_readings(&self) -> Result<Vec<GlucoseReading>>;
}

/// Reserved key-value store for future sync checkpoints
#[async_trait]
pub trait SyncMetaRepository: Send + Sync {
    /// Read a checkpoint value
    async fn get_checkpoint(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a checkpoint value
    async fn put_checkpoint(&self, key: &str, value: &str) -> Result<()>;
}
