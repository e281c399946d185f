//! Error classification primitives.
//!
//! Storage and infrastructure errors implement [`ErrorClassification`] so
//! callers can make a retry/surface/abort decision without matching on every
//! concrete variant.

use std::time::Duration;

/// Severity level of an error, used for monitoring and log filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Expected, transient conditions (pool pressure, lock contention).
    Warning,
    /// Operation failed; the caller can retry or surface a message.
    Error,
    /// The component is unusable until the condition is fixed.
    Critical,
}

/// Classification hooks shared by error types across the workspace.
pub trait ErrorClassification {
    /// Whether retrying the same operation has a reasonable chance of
    /// succeeding.
    fn is_retryable(&self) -> bool;

    /// Severity level for monitoring and alerting.
    fn severity(&self) -> ErrorSeverity;

    /// Whether this error requires immediate attention.
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Suggested delay before a retry, when the error carries one.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}
