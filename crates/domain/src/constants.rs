//! Application constants
//!
//! Centralized location for domain-level constants used across crates.

/// `sync_meta` key under which a remote-sync collaborator records the
/// timestamp of its last confirmed push.
pub const SYNC_CHECKPOINT_LAST_PUSH: &str = "last_push_at";

/// Separator used in the profile `restriction` tag list.
pub const RESTRICTION_TAG_SEPARATOR: char = ',';
