//! Appointment list operations

use super::HealthStore;
use crate::events::StoreEvent;
use health_tracker_shared::Appointment;
use tracing::debug;
use uuid::Uuid;

impl HealthStore {
    /// Append an appointment and keep the list ordered by date
    ///
    /// Appointments at the same instant have no guaranteed relative order.
    /// Identifiers are not checked for duplicates.
    pub fn add_appointment(&mut self, appointment: Appointment) {
        debug!(appointment_id = %appointment.id, title = %appointment.title, "Appointment added");
        self.appointments.push(appointment);
        self.appointments.sort_unstable_by(|a, b| a.date.cmp(&b.date));
        self.changed(StoreEvent::AppointmentsChanged);
    }

    /// Remove every appointment whose id is in `ids`
    pub fn delete_appointments(&mut self, ids: &[Uuid]) {
        let before = self.appointments.len();
        self.appointments.retain(|a| !ids.contains(&a.id));
        let removed = before - self.appointments.len();
        if removed > 0 {
            debug!(removed, "Appointments deleted");
            self.changed(StoreEvent::AppointmentsChanged);
        }
    }

    /// Mark an appointment completed; there is no way back through this call
    pub fn complete_appointment(&mut self, id: Uuid) {
        let Some(appointment) = self.appointments.iter_mut().find(|a| a.id == id) else {
            return;
        };
        appointment.is_completed = true;
        self.changed(StoreEvent::AppointmentsChanged);
    }

    /// Not completed and strictly in the future, in date order
    pub fn upcoming_appointments(&self) -> Vec<&Appointment> {
        let now = self.now();
        self.appointments
            .iter()
            .filter(|a| !a.is_completed && a.date > now)
            .collect()
    }

    pub fn completed_appointments(&self) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.is_completed).collect()
    }
}
