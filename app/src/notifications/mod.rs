//! Local notification reminders for medications

mod center;
mod delegate;
mod scheduler;

pub use center::{
    AuthorizationOptions, CalendarTrigger, InMemoryNotificationCenter, LoggingNotificationCenter,
    NotificationAction, NotificationCategory, NotificationCenter, NotificationContent,
    NotificationRequest, NotificationSound,
};
pub use delegate::{
    parse_medication_id, NotificationDelegate, NotificationResponse, ReminderAction,
    ReminderResponse,
};
pub use scheduler::{
    medication_reminder_category, notification_identifier, reminder_requests, ReminderScheduler,
};

/// Category shared by every medication reminder
pub const MEDICATION_REMINDER_CATEGORY: &str = "MEDICATION_REMINDER";

/// Action id of the "Mark as Taken" button
pub const MARK_AS_TAKEN_ACTION: &str = "MARK_AS_TAKEN";

/// Action id the platform reports when the notification itself is tapped
pub const DEFAULT_ACTION: &str = "com.apple.UNNotificationDefaultActionIdentifier";
