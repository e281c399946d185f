//! User profile types
//!
//! The single per-device user health/demographic record. At most one profile
//! row exists locally; writes fully replace the row keyed by `id`.

use serde::{Deserialize, Serialize};

use crate::constants::RESTRICTION_TAG_SEPARATOR;

/// User profile stored in the local database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque unique identifier, immutable once created
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// External-identity reference from the sign-in flow
    pub google_id: Option<String>,
    pub onboarding_completed: bool,
    pub biometric_enabled: bool,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Body height in centimetres
    pub height_cm: Option<f64>,
    pub birth_date: Option<String>,
    /// Free-text classification (prediabetic, type-1, type-2)
    pub condition: Option<String>,
    /// Comma-separated dietary restriction tags
    pub restriction: Option<String>,
    /// RFC 3339 timestamp stamped by the store on every mutation. The
    /// caller-supplied value is ignored on upsert; read the returned profile
    /// for the authoritative one.
    pub updated_at: String,
    /// True whenever the local record has changed since the last confirmed
    /// remote sync. Persisted exactly as supplied by the caller.
    pub pending_sync: bool,
}

impl UserProfile {
    /// New profile with the given id and every optional field unset.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: None,
            email: None,
            google_id: None,
            onboarding_completed: false,
            biometric_enabled: false,
            weight_kg: None,
            height_cm: None,
            birth_date: None,
            condition: None,
            restriction: None,
            updated_at: String::new(),
            pending_sync: false,
        }
    }

    /// Parse the comma-separated `restriction` field into individual tags.
    ///
    /// Empty segments are dropped, surrounding whitespace is trimmed.
    pub fn restriction_tags(&self) -> Vec<&str> {
        self.restriction
            .as_deref()
            .map(|raw| {
                raw.split(RESTRICTION_TAG_SEPARATOR)
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
