//! # Glucolog Core
//!
//! Business logic and port definitions for the Glucolog record store.
//!
//! This crate contains:
//! - Port traits the infrastructure layer implements
//!   ([`records::ports`])
//! - The [`records::service::HealthRecordService`] wired at application
//!   startup
//!
//! ## Architecture
//! - Depends only on `glucolog-domain`
//! - No I/O: everything impure lives behind the port traits

pub mod records;

// Re-export commonly used items
pub use records::ports::{ProfileRepository, ReadingRepository, SyncMetaRepository};
pub use records::service::HealthRecordService;
