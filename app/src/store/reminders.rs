//! Applying reminder responses forwarded by the notification delegate

use super::HealthStore;
use crate::events::StoreEvent;
use crate::notifications::{ReminderAction, ReminderResponse};
use tracing::info;

impl HealthStore {
    /// Apply a tapped or actioned reminder
    ///
    /// "Mark as taken" with a known id marks the medication taken and asks for
    /// a confirmation. Either action opens the medications tab, highlighting
    /// the medication when the id could be parsed.
    pub fn apply_reminder_response(&mut self, response: ReminderResponse) {
        let Some(id) = response.medication_id else {
            self.events.publish(StoreEvent::OpenMedications { highlight: None });
            return;
        };

        match response.action {
            ReminderAction::MarkAsTaken => {
                info!(medication_id = %id, "Medication marked as taken from reminder");
                self.mark_taken(id);
                self.events.publish(StoreEvent::OpenMedications { highlight: Some(id) });
                self.events.publish(StoreEvent::ShowTakenConfirmation { medication_id: id });
            }
            ReminderAction::Open => {
                self.events.publish(StoreEvent::OpenMedications { highlight: Some(id) });
            }
        }
    }
}
