//! Inbound notification responses
//!
//! The platform calls [`NotificationDelegate::did_receive`] when the user taps
//! a delivered reminder or presses one of its actions. That happens outside
//! the task that owns the store, so the delegate only parses the response and
//! forwards a [`ReminderResponse`] over a channel; the owning task applies it
//! with [`HealthStore::apply_reminder_response`](crate::store::HealthStore::apply_reminder_response).

use super::{DEFAULT_ACTION, MARK_AS_TAKEN_ACTION};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Response as handed over by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResponse {
    pub notification_identifier: String,
    pub action_identifier: String,
}

impl NotificationResponse {
    pub fn new(notification_identifier: impl Into<String>, action_identifier: impl Into<String>) -> Self {
        Self {
            notification_identifier: notification_identifier.into(),
            action_identifier: action_identifier.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    /// The "mark as taken" button
    MarkAsTaken,
    /// The notification body was tapped
    Open,
}

/// A parsed response, ready to be applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderResponse {
    pub action: ReminderAction,
    /// `None` when the notification identifier did not carry a medication id
    pub medication_id: Option<Uuid>,
}

impl ReminderResponse {
    /// Classify a platform response; unknown actions yield `None`
    pub fn from_platform(response: &NotificationResponse) -> Option<Self> {
        let action = match response.action_identifier.as_str() {
            MARK_AS_TAKEN_ACTION => ReminderAction::MarkAsTaken,
            DEFAULT_ACTION => ReminderAction::Open,
            _ => return None,
        };
        Some(Self {
            action,
            medication_id: parse_medication_id(&response.notification_identifier),
        })
    }
}

/// Extract the medication id from a `{uuid}_{index}` notification identifier
///
/// Only the text before the first `_` is considered.
pub fn parse_medication_id(notification_identifier: &str) -> Option<Uuid> {
    let prefix = notification_identifier.split('_').next()?;
    Uuid::parse_str(prefix).ok()
}

/// Receives platform notification responses and hands them to the store owner
#[derive(Debug, Clone)]
pub struct NotificationDelegate {
    responses: mpsc::UnboundedSender<ReminderResponse>,
}

impl NotificationDelegate {
    /// Create a delegate and the receiver the store-owning task listens on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ReminderResponse>) {
        let (responses, receiver) = mpsc::unbounded_channel();
        (Self { responses }, receiver)
    }

    pub fn did_receive(&self, response: &NotificationResponse) {
        let Some(parsed) = ReminderResponse::from_platform(response) else {
            debug!(
                action = %response.action_identifier,
                "Ignoring notification response with unhandled action"
            );
            return;
        };

        if parsed.medication_id.is_none() {
            debug!(
                notification_id = %response.notification_identifier,
                "Notification identifier carries no medication id"
            );
        }

        if self.responses.send(parsed).is_err() {
            warn!("Store is gone, dropping notification response");
        }
    }
}
