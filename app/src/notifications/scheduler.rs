//! Medication reminder scheduling
//!
//! [`ReminderScheduler`] turns a medication's reminder times into daily
//! repeating notification requests. Calls are fire-and-forget: they queue a
//! command and return at once. A dispatcher task owns the
//! [`NotificationCenter`] and works through the queue in order, logging any
//! platform failure. Nothing the platform reports flows back into domain
//! state.

use super::center::{
    AuthorizationOptions, CalendarTrigger, NotificationAction, NotificationCategory,
    NotificationCenter, NotificationContent, NotificationRequest, NotificationSound,
};
use super::{MARK_AS_TAKEN_ACTION, MEDICATION_REMINDER_CATEGORY};
use crate::error::{NotificationError, NotificationResult};
use chrono::Timelike;
use health_tracker_shared::Medication;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Build the notification identifier for one reminder of a medication
///
/// Format: `{medication_id}_{index}`, index zero-based.
pub fn notification_identifier(medication_id: Uuid, index: usize) -> String {
    format!("{}_{}", medication_id, index)
}

/// Build one daily request per reminder time of `medication`
///
/// Only the hour and minute of each reminder time are kept.
pub fn reminder_requests(medication: &Medication) -> Vec<NotificationRequest> {
    medication
        .reminder_times
        .iter()
        .enumerate()
        .map(|(index, time)| NotificationRequest {
            identifier: notification_identifier(medication.id, index),
            content: NotificationContent {
                title: "Medication Reminder".to_string(),
                body: format!(
                    "It's time to take your medication: {} ({})",
                    medication.name, medication.dosage
                ),
                sound: NotificationSound::Default,
                category_identifier: MEDICATION_REMINDER_CATEGORY.to_string(),
            },
            trigger: CalendarTrigger {
                hour: time.hour(),
                minute: time.minute(),
                repeats: true,
            },
        })
        .collect()
}

/// The "mark as taken" category attached to every medication reminder
pub fn medication_reminder_category() -> NotificationCategory {
    NotificationCategory {
        identifier: MEDICATION_REMINDER_CATEGORY.to_string(),
        actions: vec![NotificationAction {
            identifier: MARK_AS_TAKEN_ACTION.to_string(),
            title: "Mark as Taken".to_string(),
            authentication_required: true,
        }],
    }
}

#[derive(Debug)]
enum Command {
    RequestAuthorization(AuthorizationOptions),
    SetCategories(Vec<NotificationCategory>),
    Add(NotificationRequest),
    Remove(Vec<String>),
    Flush(oneshot::Sender<()>),
}

/// Handle to the reminder dispatcher
///
/// Cheap to clone; all clones feed the same dispatcher task.
#[derive(Debug, Clone)]
pub struct ReminderScheduler {
    commands: mpsc::UnboundedSender<Command>,
    enabled: bool,
    permission_requested: Arc<AtomicBool>,
    category_registered: Arc<AtomicBool>,
}

impl ReminderScheduler {
    /// Start the dispatcher task on the current tokio runtime
    ///
    /// With `enabled == false` reminder registration is skipped, but
    /// permission and category calls still go through.
    pub fn spawn(center: Arc<dyn NotificationCenter>, enabled: bool) -> (Self, JoinHandle<()>) {
        let (commands, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(dispatch(center, receiver));
        let scheduler = Self {
            commands,
            enabled,
            permission_requested: Arc::new(AtomicBool::new(false)),
            category_registered: Arc::new(AtomicBool::new(false)),
        };
        (scheduler, handle)
    }

    /// Ask for alert, sound and badge permission
    ///
    /// Only the first call reaches the platform. The answer is logged.
    pub fn request_permission(&self) {
        if self.permission_requested.swap(true, Ordering::SeqCst) {
            debug!("Notification permission already requested");
            return;
        }
        self.send(Command::RequestAuthorization(AuthorizationOptions::ALL));
    }

    /// Declare the medication reminder category with its "mark as taken" action
    pub fn register_action_category(&self) {
        if self.category_registered.swap(true, Ordering::SeqCst) {
            return;
        }
        self.send(Command::SetCategories(vec![medication_reminder_category()]));
    }

    /// Register one daily reminder per reminder time of `medication`
    ///
    /// Returns the requests that were queued.
    pub fn register_reminders(&self, medication: &Medication) -> Vec<NotificationRequest> {
        if !self.enabled {
            debug!(medication_id = %medication.id, "Notifications disabled, skipping reminders");
            return Vec::new();
        }
        if medication.reminder_times.is_empty() {
            debug!(medication_id = %medication.id, "Medication has no reminder times");
            return Vec::new();
        }

        // The category has to exist before content referencing it is scheduled
        self.register_action_category();

        let requests = reminder_requests(medication);
        for request in &requests {
            self.send(Command::Add(request.clone()));
        }
        info!(
            medication_id = %medication.id,
            medication = %medication.name,
            count = requests.len(),
            "Medication reminders queued"
        );
        requests
    }

    /// Remove the pending reminders previously registered for `medication`
    pub fn cancel_reminders(&self, medication: &Medication) -> Vec<String> {
        let identifiers: Vec<String> = (0..medication.reminder_times.len())
            .map(|index| notification_identifier(medication.id, index))
            .collect();
        if identifiers.is_empty() {
            return identifiers;
        }
        self.send(Command::Remove(identifiers.clone()));
        identifiers
    }

    /// Wait until every command queued before this call has been handled
    pub async fn flush(&self) -> NotificationResult<()> {
        let (done, wait) = oneshot::channel();
        self.commands
            .send(Command::Flush(done))
            .map_err(|_| NotificationError::SchedulerClosed)?;
        wait.await.map_err(|_| NotificationError::SchedulerClosed)
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!(error = %NotificationError::SchedulerClosed, "Dropping notification command");
        }
    }
}

async fn dispatch(center: Arc<dyn NotificationCenter>, mut commands: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = commands.recv().await {
        match command {
            Command::RequestAuthorization(options) => {
                match center.request_authorization(options).await {
                    Ok(true) => info!("Notification permission granted"),
                    Ok(false) => info!("Notification permission denied"),
                    Err(e) => warn!(error = %e, "Notification permission error"),
                }
            }
            Command::SetCategories(categories) => {
                if let Err(e) = center.set_categories(categories).await {
                    warn!(error = %e, "Failed to register notification categories");
                }
            }
            Command::Add(request) => {
                let identifier = request.identifier.clone();
                match center.add(request).await {
                    Ok(()) => debug!(notification_id = %identifier, "Notification scheduled"),
                    Err(e) => warn!(
                        notification_id = %identifier,
                        error = %e,
                        "Failed to schedule notification"
                    ),
                }
            }
            Command::Remove(identifiers) => {
                if let Err(e) = center.remove_pending(identifiers).await {
                    warn!(error = %e, "Failed to remove pending notifications");
                }
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Reminder dispatcher stopped");
}
