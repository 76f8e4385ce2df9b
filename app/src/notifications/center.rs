//! Platform notification service seam
//!
//! [`NotificationCenter`] is the boundary to the operating system's local
//! notification service. The app only configures it: it registers requests,
//! declares action categories and asks for permission. Delivery happens on
//! the platform's side and comes back through
//! [`NotificationDelegate`](super::NotificationDelegate).

use crate::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::info;

/// What the app asks permission to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthorizationOptions {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
}

impl AuthorizationOptions {
    pub const ALL: AuthorizationOptions = AuthorizationOptions {
        alert: true,
        sound: true,
        badge: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationSound {
    Default,
    Silent,
}

/// What the user sees when a notification fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub sound: NotificationSound,
    pub category_identifier: String,
}

/// Fires when the wall clock matches `hour:minute`, every day if `repeats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarTrigger {
    pub hour: u32,
    pub minute: u32,
    pub repeats: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRequest {
    /// Requests with the same identifier replace each other
    pub identifier: String,
    pub content: NotificationContent,
    pub trigger: CalendarTrigger,
}

/// A button shown on a delivered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationAction {
    pub identifier: String,
    pub title: String,
    pub authentication_required: bool,
}

/// Groups actions under a category identifier referenced by content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationCategory {
    pub identifier: String,
    pub actions: Vec<NotificationAction>,
}

/// Host platform notification service
#[async_trait]
pub trait NotificationCenter: Send + Sync {
    /// Ask the user for consent; `Ok(false)` means denied
    async fn request_authorization(&self, options: AuthorizationOptions) -> NotificationResult<bool>;

    async fn add(&self, request: NotificationRequest) -> NotificationResult<()>;

    /// Replaces every previously declared category
    async fn set_categories(&self, categories: Vec<NotificationCategory>) -> NotificationResult<()>;

    async fn remove_pending(&self, identifiers: Vec<String>) -> NotificationResult<()>;
}

// ============================================================================
// Logging center
// ============================================================================

/// Stand-in for the platform when running headless; logs every call
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationCenter;

#[async_trait]
impl NotificationCenter for LoggingNotificationCenter {
    async fn request_authorization(&self, options: AuthorizationOptions) -> NotificationResult<bool> {
        info!(?options, "Notification authorization requested");
        Ok(true)
    }

    async fn add(&self, request: NotificationRequest) -> NotificationResult<()> {
        info!(
            notification_id = %request.identifier,
            hour = request.trigger.hour,
            minute = request.trigger.minute,
            repeats = request.trigger.repeats,
            body = %request.content.body,
            "Notification scheduled"
        );
        Ok(())
    }

    async fn set_categories(&self, categories: Vec<NotificationCategory>) -> NotificationResult<()> {
        for category in &categories {
            info!(
                category = %category.identifier,
                actions = category.actions.len(),
                "Notification category declared"
            );
        }
        Ok(())
    }

    async fn remove_pending(&self, identifiers: Vec<String>) -> NotificationResult<()> {
        info!(?identifiers, "Pending notifications removed");
        Ok(())
    }
}

// ============================================================================
// In-memory center
// ============================================================================

#[derive(Debug, Default)]
struct InMemoryState {
    pending: Vec<NotificationRequest>,
    categories: Vec<NotificationCategory>,
    authorization_requests: usize,
    deny_permission: bool,
    failure: Option<String>,
}

/// Records requests instead of delivering them
///
/// Clones share state, so a test can keep one handle and give another to
/// the scheduler.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationCenter {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer permission requests with "denied"
    pub fn denying_permission(self) -> Self {
        self.lock().deny_permission = true;
        self
    }

    /// Make every `add` fail with a platform error
    pub fn failing_with(self, message: impl Into<String>) -> Self {
        self.lock().failure = Some(message.into());
        self
    }

    pub fn pending(&self) -> Vec<NotificationRequest> {
        self.lock().pending.clone()
    }

    pub fn pending_identifiers(&self) -> Vec<String> {
        self.lock().pending.iter().map(|r| r.identifier.clone()).collect()
    }

    pub fn categories(&self) -> Vec<NotificationCategory> {
        self.lock().categories.clone()
    }

    pub fn authorization_requests(&self) -> usize {
        self.lock().authorization_requests
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl NotificationCenter for InMemoryNotificationCenter {
    async fn request_authorization(&self, _options: AuthorizationOptions) -> NotificationResult<bool> {
        let mut state = self.lock();
        state.authorization_requests += 1;
        Ok(!state.deny_permission)
    }

    async fn add(&self, request: NotificationRequest) -> NotificationResult<()> {
        let mut state = self.lock();
        if let Some(message) = &state.failure {
            return Err(NotificationError::Platform(message.clone()));
        }
        state.pending.retain(|r| r.identifier != request.identifier);
        state.pending.push(request);
        Ok(())
    }

    async fn set_categories(&self, categories: Vec<NotificationCategory>) -> NotificationResult<()> {
        self.lock().categories = categories;
        Ok(())
    }

    async fn remove_pending(&self, identifiers: Vec<String>) -> NotificationResult<()> {
        self.lock()
            .pending
            .retain(|r| !identifiers.contains(&r.identifier));
        Ok(())
    }
}
