//! Application error handling
//!
//! Notification failures never reach domain state: the scheduler logs them
//! and moves on.

use thiserror::Error;

/// Errors reported by the platform notification service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Platform notification error: {0}")]
    Platform(String),

    #[error("Reminder scheduler is no longer running")]
    SchedulerClosed,
}

/// Result type alias for notification service calls
pub type NotificationResult<T> = Result<T, NotificationError>;
