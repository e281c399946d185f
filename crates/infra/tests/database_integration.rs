//! End-to-end integration coverage for the SQLite-backed record store.
//!
//! These tests exercise the full stack (`HealthRecordService` over the real
//! repositories and schema) against an isolated temporary database, so the
//! singleton-profile, immutability, and ordering rules are checked exactly
//! where production reads and writes them.

use std::sync::Arc;

use chrono::DateTime;
use glucolog_core::records::ports::SyncMetaRepository;
use glucolog_core::HealthRecordService;
use glucolog_domain::constants::SYNC_CHECKPOINT_LAST_PUSH;
use glucolog_domain::{GlucologError, GlucoseReading, MealContext, UserProfile};
use glucolog_infra::database::{
    DbManager, SqliteProfileRepository, SqliteReadingRepository, SqliteSyncMetaRepository,
};
use tempfile::TempDir;
use uuid::Uuid;

struct DbHarness {
    #[allow(dead_code)]
    temp_dir: TempDir,
    manager: Arc<DbManager>,
}

impl DbHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("temporary directory should be created");
        let db_path = temp_dir.path().join("records-integration.db");

        let manager =
            Arc::new(DbManager::new(&db_path, 4).expect("database manager should initialise"));
        manager.run_migrations().expect("schema migrations should apply");

        Self { temp_dir, manager }
    }

    fn service(&self) -> HealthRecordService {
        HealthRecordService::new(
            Arc::new(SqliteProfileRepository::new(Arc::clone(&self.manager))),
            Arc::new(SqliteReadingRepository::new(Arc::clone(&self.manager))),
        )
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn fresh_store_is_empty() {
    let harness = DbHarness::new();
    let service = harness.service();

    assert!(service.get_profile().await.expect("get profile").is_none());
    assert!(service.list_readings().await.expect("list readings").is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn initialization_is_idempotent() {
    let harness = DbHarness::new();

    for _ in 0..5 {
        harness.manager.run_migrations().expect("repeated migration should succeed");
    }

    harness.manager.health_check().expect("health check should pass");

    // Data written before a re-init survives it
    let service = harness.service();
    service
        .add_reading(GlucoseReading::new("r1", "2024-01-01T08:00:00Z", 95.0))
        .await
        .expect("insert");
    harness.manager.run_migrations().expect("migration after writes should succeed");
    assert_eq!(service.list_readings().await.expect("list").len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_scenario_round_trips_with_unset_fields_as_none() {
    let harness = DbHarness::new();
    let service = harness.service();

    let mut profile = UserProfile::new("u1");
    profile.full_name = Some("Ana".into());
    profile.weight_kg = Some(70.0);
    profile.height_cm = Some(165.0);

    let stored = service.upsert_profile(profile).await.expect("upsert profile");

    assert_eq!(stored.id, "u1");
    assert_eq!(stored.full_name.as_deref(), Some("Ana"));
    assert_eq!(stored.weight_kg, Some(70.0));
    assert_eq!(stored.height_cm, Some(165.0));
    assert!(!stored.onboarding_completed);
    assert!(!stored.biometric_enabled);
    assert!(stored.email.is_none());
    assert!(stored.google_id.is_none());
    assert!(stored.birth_date.is_none());
    assert!(stored.condition.is_none());
    assert!(stored.restriction.is_none());

    // The store stamped the mutation time
    DateTime::parse_from_rfc3339(&stored.updated_at).expect("updated_at should be RFC 3339");
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_stays_singleton_across_upserts() {
    let harness = DbHarness::new();
    let service = harness.service();

    let mut profile = UserProfile::new("u1");
    profile.full_name = Some("Ana".into());
    profile.pending_sync = true;
    service.upsert_profile(profile.clone()).await.expect("first upsert");

    profile.full_name = Some("Ana Maria".into());
    profile.condition = Some("prediabetic".into());
    service.upsert_profile(profile).await.expect("second upsert");

    let stored = service.get_profile().await.expect("get profile").expect("profile exists");
    assert_eq!(stored.full_name.as_deref(), Some("Ana Maria"));
    assert_eq!(stored.condition.as_deref(), Some("prediabetic"));

    let conn = harness.manager.connection().expect("connection");
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", &[], |row| row.get(0)).unwrap();
    assert_eq!(count, 1, "upserts with the same id must never create a second row");
}

#[tokio::test(flavor = "multi_thread")]
async fn boolean_normalization_is_exact() {
    let harness = DbHarness::new();
    let service = harness.service();

    let mut profile = UserProfile::new("u1");
    profile.onboarding_completed = true;
    service.upsert_profile(profile).await.expect("upsert profile");

    let stored = service.get_profile().await.expect("get profile").expect("profile exists");
    assert!(stored.onboarding_completed);
    assert!(!stored.biometric_enabled);
}

#[tokio::test(flavor = "multi_thread")]
async fn reading_scenario_lists_newest_first() {
    let harness = DbHarness::new();
    let service = harness.service();

    service
        .add_reading(GlucoseReading::new("r1", "2024-01-01T08:00:00Z", 95.0))
        .await
        .expect("insert r1");
    service
        .add_reading(GlucoseReading::new("r2", "2024-01-02T08:00:00Z", 110.0))
        .await
        .expect("insert r2");

    let readings = service.list_readings().await.expect("list readings");
    let ids: Vec<_> = readings.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r2", "r1"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn ordering_holds_for_arbitrary_insertion_order() {
    let harness = DbHarness::new();
    let service = harness.service();

    // T2, T1, T3 inserted out of order
    for (id, ts) in [
        ("t2", "2024-03-02T12:00:00Z"),
        ("t1", "2024-03-01T12:00:00Z"),
        ("t3", "2024-03-03T12:00:00Z"),
    ] {
        service.add_reading(GlucoseReading::new(id, ts, 100.0)).await.expect("insert");
    }

    let readings = service.list_readings().await.expect("list readings");
    let ids: Vec<_> = readings.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["t3", "t2", "t1"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_reading_id_leaves_prior_row_unchanged() {
    let harness = DbHarness::new();
    let service = harness.service();

    let mut original = GlucoseReading::new("r1", "2024-01-01T08:00:00Z", 95.0);
    original.meal_context = Some(MealContext::Fasting);
    service.add_reading(original.clone()).await.expect("first insert");

    let colliding = GlucoseReading::new("r1", "2024-06-01T08:00:00Z", 180.0);
    let err = service.add_reading(colliding).await.expect_err("collision must fail");
    assert!(matches!(err, GlucologError::DuplicateKey(_)));

    let readings = service.list_readings().await.expect("list readings");
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0], original);
}

#[tokio::test(flavor = "multi_thread")]
async fn readings_with_generated_ids_accumulate() {
    let harness = DbHarness::new();
    let service = harness.service();

    for hour in 6..10 {
        let reading = GlucoseReading::new(
            Uuid::now_v7().to_string(),
            format!("2024-05-01T{hour:02}:00:00Z"),
            90.0 + f64::from(hour),
        );
        service.add_reading(reading).await.expect("insert");
    }

    let readings = service.list_readings().await.expect("list readings");
    assert_eq!(readings.len(), 4);
    assert_eq!(readings[0].measurement_time, "2024-05-01T09:00:00Z");
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_checkpoint_round_trips() {
    let harness = DbHarness::new();
    let sync_meta = SqliteSyncMetaRepository::new(Arc::clone(&harness.manager));

    assert!(sync_meta
        .get_checkpoint(SYNC_CHECKPOINT_LAST_PUSH)
        .await
        .expect("get checkpoint")
        .is_none());

    sync_meta
        .put_checkpoint(SYNC_CHECKPOINT_LAST_PUSH, "2024-02-01T00:00:00Z")
        .await
        .expect("put checkpoint");

    let value = sync_meta
        .get_checkpoint(SYNC_CHECKPOINT_LAST_PUSH)
        .await
        .expect("get checkpoint")
        .expect("checkpoint exists");
    assert_eq!(value, "2024-02-01T00:00:00Z");
}

#[tokio::test(flavor = "multi_thread")]
async fn pending_sync_flag_is_persisted_as_supplied() {
    let harness = DbHarness::new();
    let profiles = SqliteProfileRepository::new(Arc::clone(&harness.manager));
    let readings = SqliteReadingRepository::new(Arc::clone(&harness.manager));
    let service = HealthRecordService::new(Arc::new(profiles), Arc::new(readings));

    let mut profile = UserProfile::new("u1");
    profile.pending_sync = true;
    let stored = service.upsert_profile(profile).await.expect("dirty upsert");
    assert!(stored.pending_sync);

    // The sync collaborator confirms its push by writing the flag back down;
    // the store itself never clears it.
    let mut synced = stored;
    synced.pending_sync = false;
    let stored = service.upsert_profile(synced).await.expect("synced upsert");
    assert!(!stored.pending_sync);

    let reread = service.get_profile().await.expect("get profile").expect("profile exists");
    assert!(!reread.pending_sync);
}
