//! Health record store: ports and service.

pub mod ports;
pub mod service;

pub use ports::{ProfileRepository, ReadingRepository, SyncMetaRepository};
pub use service::HealthRecordService;
