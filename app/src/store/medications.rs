//! Medication list, taken flags and the daily reset

use super::HealthStore;
use crate::events::StoreEvent;
use crate::notifications::notification_identifier;
use health_tracker_shared::{FoodRelation, Medication, MedicationGroup, TimeOfDay};
use tracing::{debug, info, warn};
use uuid::Uuid;

impl HealthStore {
    /// Append a medication and queue its reminders
    pub fn add_medication(&mut self, medication: Medication) {
        self.scheduler.register_reminders(&medication);
        debug!(medication_id = %medication.id, name = %medication.name, "Medication added");
        self.medications.push(medication);
        self.changed(StoreEvent::MedicationsChanged);
    }

    /// Remove every medication whose id is in `ids`
    ///
    /// Reminders already registered for a removed medication stay scheduled
    /// unless the store was built with
    /// [`with_reminder_cancellation`](Self::with_reminder_cancellation).
    pub fn delete_medications(&mut self, ids: &[Uuid]) {
        let (removed, kept): (Vec<Medication>, Vec<Medication>) = std::mem::take(&mut self.medications)
            .into_iter()
            .partition(|m| ids.contains(&m.id));
        self.medications = kept;

        if removed.is_empty() {
            return;
        }

        for medication in &removed {
            if self.cancel_reminders_on_delete {
                self.scheduler.cancel_reminders(medication);
            } else if !medication.reminder_times.is_empty() {
                let orphaned: Vec<String> = (0..medication.reminder_times.len())
                    .map(|index| notification_identifier(medication.id, index))
                    .collect();
                warn!(
                    medication_id = %medication.id,
                    ?orphaned,
                    "Deleted medication still has scheduled reminders"
                );
            }
        }

        debug!(removed = removed.len(), "Medications deleted");
        self.changed(StoreEvent::MedicationsChanged);
    }

    /// Flip the taken flag; taking stamps the time, un-taking clears it
    pub fn toggle_taken(&mut self, id: Uuid) {
        let now = self.now();
        let Some(medication) = self.medications.iter_mut().find(|m| m.id == id) else {
            return;
        };
        medication.is_taken = !medication.is_taken;
        medication.last_taken = medication.is_taken.then_some(now);
        self.changed(StoreEvent::MedicationsChanged);
    }

    /// Set taken and stamp the time, whatever the current state
    pub fn mark_taken(&mut self, id: Uuid) {
        let now = self.now();
        let Some(medication) = self.medications.iter_mut().find(|m| m.id == id) else {
            debug!(medication_id = %id, "Mark as taken for unknown medication");
            return;
        };
        medication.is_taken = true;
        medication.last_taken = Some(now);
        self.changed(StoreEvent::MedicationsChanged);
    }

    /// Clear taken state on every medication
    pub fn reset_daily(&mut self) {
        for medication in &mut self.medications {
            medication.is_taken = false;
            medication.last_taken = None;
        }
        self.last_reset = self.clock.today();
        info!(count = self.medications.len(), "Daily medication reset");
        self.changed(StoreEvent::DailyReset);
    }

    /// Run [`reset_daily`](Self::reset_daily) if the local date moved past the last reset
    ///
    /// Called when the app returns to the foreground and on a periodic tick.
    /// Returns whether a reset happened.
    pub fn reset_daily_if_new_day(&mut self) -> bool {
        let today = self.clock.today();
        if today <= self.last_reset {
            return false;
        }
        debug!(%today, last_reset = %self.last_reset, "Day changed");
        self.reset_daily();
        true
    }

    /// Medications bucketed by time of day, then by food relation
    ///
    /// Buckets follow the fixed display orders of [`TimeOfDay::ALL`] and
    /// [`FoodRelation::ALL`]; empty buckets are left out.
    pub fn grouped_medications(&self) -> Vec<MedicationGroup> {
        let mut groups = Vec::new();
        for time_of_day in TimeOfDay::ALL {
            for food_relation in FoodRelation::ALL {
                let medications: Vec<Medication> = self
                    .medications
                    .iter()
                    .filter(|m| m.time_of_day == time_of_day && m.food_relation == food_relation)
                    .cloned()
                    .collect();
                if !medications.is_empty() {
                    groups.push(MedicationGroup {
                        time_of_day,
                        food_relation,
                        medications,
                    });
                }
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use chrono::{Duration, NaiveTime};
    use proptest::prelude::*;

    fn medication(name: &str, times: usize, time_of_day: TimeOfDay, food_relation: FoodRelation) -> Medication {
        let reminder_times = (0..times)
            .map(|i| NaiveTime::from_hms_opt(8 + i as u32, 30, 0).unwrap())
            .collect();
        Medication::new(name, "10 mg", "Daily", reminder_times, time_of_day, food_relation)
    }

    #[tokio::test]
    async fn test_add_medication_schedules_reminders() {
        let mut f = empty_fixture();
        let med = medication("Metformin", 2, TimeOfDay::Morning, FoodRelation::AfterFood);
        let id = med.id;

        f.store.add_medication(med);
        f.store.scheduler().flush().await.unwrap();

        assert_eq!(f.store.medications().len(), 1);
        assert_eq!(
            f.center.pending_identifiers(),
            vec![format!("{id}_0"), format!("{id}_1")]
        );
    }

    #[tokio::test]
    async fn test_delete_keeps_reminders_by_default() {
        let mut f = empty_fixture();
        let med = medication("Metformin", 1, TimeOfDay::Morning, FoodRelation::AfterFood);
        let id = med.id;
        f.store.add_medication(med);

        f.store.delete_medications(&[id]);
        f.store.scheduler().flush().await.unwrap();

        assert!(f.store.medications().is_empty());
        assert_eq!(f.center.pending_identifiers(), vec![format!("{id}_0")]);
    }

    #[tokio::test]
    async fn test_delete_cancels_reminders_when_enabled() {
        let f = empty_fixture();
        let mut store = f.store.with_reminder_cancellation(true);
        let med = medication("Metformin", 2, TimeOfDay::Morning, FoodRelation::AfterFood);
        let id = med.id;
        store.add_medication(med);

        store.delete_medications(&[id]);
        store.scheduler().flush().await.unwrap();

        assert!(f.center.pending().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_ids_is_noop() {
        let mut f = sample_fixture();
        f.store.delete_medications(&[Uuid::new_v4()]);
        assert_eq!(f.store.medications().len(), 4);
        assert_eq!(f.store.revision(), 0);
    }

    #[tokio::test]
    async fn test_toggle_taken_round_trip() {
        let mut f = sample_fixture();
        let id = f.store.medications()[0].id;

        f.store.toggle_taken(id);
        let med = f.store.medication(id).unwrap();
        assert!(med.is_taken);
        assert_eq!(med.last_taken, Some(start()));

        f.store.toggle_taken(id);
        let med = f.store.medication(id).unwrap();
        assert!(!med.is_taken);
        assert_eq!(med.last_taken, None);
    }

    #[tokio::test]
    async fn test_mark_taken_is_unconditional() {
        let mut f = sample_fixture();
        let id = f.store.medications()[1].id;

        f.store.mark_taken(id);
        f.clock.advance(Duration::minutes(5));
        f.store.mark_taken(id);

        let med = f.store.medication(id).unwrap();
        assert!(med.is_taken);
        assert_eq!(med.last_taken, Some(start() + Duration::minutes(5)));

        f.store.mark_taken(Uuid::new_v4());
        assert_eq!(f.store.revision(), 2);
    }

    #[tokio::test]
    async fn test_reset_daily_clears_everything() {
        let mut f = sample_fixture();
        let ids: Vec<Uuid> = f.store.medications().iter().map(|m| m.id).collect();
        for id in &ids {
            f.store.mark_taken(*id);
        }

        f.store.reset_daily();

        for _ in 0..3 {
            let groups = f.store.grouped_medications();
            assert!(groups
                .iter()
                .flat_map(|g| g.medications.iter())
                .all(|m| !m.is_taken && m.last_taken.is_none()));
        }
        assert!(f.store.medications().iter().all(|m| !m.is_taken && m.last_taken.is_none()));
    }

    #[tokio::test]
    async fn test_reset_if_new_day() {
        let mut f = sample_fixture();
        let id = f.store.medications()[0].id;
        f.store.mark_taken(id);

        // Same instant, same day
        assert!(!f.store.reset_daily_if_new_day());
        assert!(f.store.medication(id).unwrap().is_taken);

        // Two days later is a new local day in any time zone
        f.clock.advance(Duration::days(2));
        let mut events = f.store.subscribe();
        assert!(f.store.reset_daily_if_new_day());
        assert!(!f.store.medication(id).unwrap().is_taken);
        assert_eq!(events.try_recv().unwrap(), StoreEvent::DailyReset);

        // Only once per day
        assert!(!f.store.reset_daily_if_new_day());
    }

    #[tokio::test]
    async fn test_grouped_medications_order() {
        let mut f = empty_fixture();
        let night = medication("Sleep Aid", 1, TimeOfDay::Night, FoodRelation::None);
        let morning_after = medication("Vitamin D3", 1, TimeOfDay::Morning, FoodRelation::AfterFood);
        let morning_before = medication("BP", 1, TimeOfDay::Morning, FoodRelation::BeforeFood);
        let morning_before_2 = medication("Thyroid", 1, TimeOfDay::Morning, FoodRelation::BeforeFood);
        let evening = medication("Omega-3", 1, TimeOfDay::Evening, FoodRelation::BeforeFood);
        for med in [night, morning_after, morning_before, evening, morning_before_2] {
            f.store.add_medication(med);
        }

        let groups = f.store.grouped_medications();
        let keys: Vec<(TimeOfDay, FoodRelation)> =
            groups.iter().map(|g| (g.time_of_day, g.food_relation)).collect();
        assert_eq!(
            keys,
            vec![
                (TimeOfDay::Morning, FoodRelation::BeforeFood),
                (TimeOfDay::Morning, FoodRelation::AfterFood),
                (TimeOfDay::Evening, FoodRelation::BeforeFood),
                (TimeOfDay::Night, FoodRelation::None),
            ]
        );

        // Collection order inside a group
        let names: Vec<&str> = groups[0].medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["BP", "Thyroid"]);
    }

    #[tokio::test]
    async fn test_grouped_medications_empty() {
        let f = empty_fixture();
        assert!(f.store.grouped_medications().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Property: two toggles restore the flag, and last_taken tracks it
        #[test]
        fn prop_toggle_is_involution(index in 0usize..4, initially_taken in any::<bool>()) {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let _guard = runtime.enter();
            let mut f = sample_fixture();
            let id = f.store.medications()[index].id;
            if initially_taken {
                f.store.mark_taken(id);
            }
            let before = f.store.medication(id).unwrap().is_taken;

            f.store.toggle_taken(id);
            let med = f.store.medication(id).unwrap();
            prop_assert_eq!(med.is_taken, !before);
            prop_assert_eq!(med.last_taken.is_some(), med.is_taken);

            f.store.toggle_taken(id);
            let med = f.store.medication(id).unwrap();
            prop_assert_eq!(med.is_taken, before);
            prop_assert_eq!(med.last_taken.is_some(), med.is_taken);
        }

        /// Property: grouping is a partition of the collection
        #[test]
        fn prop_groups_partition_medications(
            kinds in prop::collection::vec((0usize..4, 0usize..3), 0..20)
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let _guard = runtime.enter();
            let mut f = empty_fixture();
            for (t, r) in &kinds {
                f.store.add_medication(medication("M", 1, TimeOfDay::ALL[*t], FoodRelation::ALL[*r]));
            }

            let groups = f.store.grouped_medications();
            let total: usize = groups.iter().map(|g| g.medications.len()).sum();
            prop_assert_eq!(total, kinds.len());
            prop_assert!(groups.iter().all(|g| !g.medications.is_empty()));
            prop_assert!(groups.iter().all(|g| g
                .medications
                .iter()
                .all(|m| m.time_of_day == g.time_of_day && m.food_relation == g.food_relation)));
        }
    }
}
