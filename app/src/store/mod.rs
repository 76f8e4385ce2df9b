//! Domain state
//!
//! [`HealthStore`] is the single source of truth for the profile,
//! appointments, medications and the daily health summary. Exactly one task
//! owns it; everything else talks to that task through channels or watches
//! its [`EventBus`]. Derived views (upcoming appointments, medication groups)
//! are recomputed on every read; [`HealthStore::revision`] lets callers
//! memoize if they need to.
//!
//! Lookups by identifier that miss are silent no-ops and publish nothing.

mod appointments;
mod medications;
mod profile;
mod reminders;

use crate::clock::Clock;
use crate::events::{EventBus, StoreEvent};
use crate::notifications::ReminderScheduler;
use chrono::{DateTime, NaiveDate, Utc};
use health_tracker_shared::{seed, Appointment, HealthSummary, Medication, User};
use std::sync::Arc;
use uuid::Uuid;

/// Initial contents of a [`HealthStore`]
#[derive(Debug, Clone)]
pub struct StoreData {
    pub user: User,
    pub appointments: Vec<Appointment>,
    pub medications: Vec<Medication>,
    pub health_summary: HealthSummary,
}

impl StoreData {
    /// The compiled-in sample profile, appointments and medications
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            user: seed::sample_user(),
            appointments: seed::sample_appointments(now),
            medications: seed::sample_medications(),
            health_summary: seed::sample_health_summary(now),
        }
    }

    /// Sample profile with no appointments, medications or metrics
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            user: seed::sample_user(),
            appointments: Vec::new(),
            medications: Vec::new(),
            health_summary: HealthSummary {
                steps: 0,
                heart_rate: 0,
                calories: 0,
                sleep_hours: 0.0,
                water_intake: 0.0,
                date: now,
            },
        }
    }
}

pub struct HealthStore {
    user: User,
    appointments: Vec<Appointment>,
    medications: Vec<Medication>,
    health_summary: HealthSummary,
    scheduler: ReminderScheduler,
    clock: Arc<dyn Clock>,
    events: EventBus,
    cancel_reminders_on_delete: bool,
    /// Local date of the last daily reset
    last_reset: NaiveDate,
    revision: u64,
}

impl HealthStore {
    /// Build the store from its initial data and collaborators
    ///
    /// Initial medications are assumed to have their reminders registered
    /// already; only [`add_medication`](Self::add_medication) schedules.
    pub fn new(
        data: StoreData,
        scheduler: ReminderScheduler,
        clock: Arc<dyn Clock>,
        events: EventBus,
    ) -> Self {
        let mut appointments = data.appointments;
        appointments.sort_by(|a, b| a.date.cmp(&b.date));
        let last_reset = clock.today();

        Self {
            user: data.user,
            appointments,
            medications: data.medications,
            health_summary: data.health_summary,
            scheduler,
            clock,
            events,
            cancel_reminders_on_delete: false,
            last_reset,
            revision: 0,
        }
    }

    /// Also remove pending reminders when medications are deleted
    pub fn with_reminder_cancellation(mut self, enabled: bool) -> Self {
        self.cancel_reminders_on_delete = enabled;
        self
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// All appointments, ascending by date
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn medication(&self, id: Uuid) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == id)
    }

    pub fn health_summary(&self) -> &HealthSummary {
        &self.health_summary
    }

    /// Incremented by every mutation that changed state
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn changed(&mut self, event: StoreEvent) {
        self.revision += 1;
        self.events.publish(event);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_sample_store_contents() {
        let f = sample_fixture();
        assert_eq!(f.store.appointments().len(), 3);
        assert_eq!(f.store.medications().len(), 4);
        assert_eq!(f.store.health_summary().steps, 8420);
        assert_eq!(f.store.revision(), 0);
    }

    #[tokio::test]
    async fn test_initial_medications_are_not_scheduled() {
        let f = sample_fixture();
        f.store.scheduler().flush().await.unwrap();
        assert!(f.center.pending().is_empty());
    }

    #[tokio::test]
    async fn test_initial_appointments_are_sorted() {
        let mut data = StoreData::empty(start());
        let later = Appointment::new("Later", "Dr. B", start() + chrono::Duration::days(5), "X");
        let sooner = Appointment::new("Sooner", "Dr. A", start() + chrono::Duration::days(1), "Y");
        data.appointments = vec![later, sooner];

        let f = fixture(data);
        assert_eq!(f.store.appointments()[0].title, "Sooner");
    }
}
