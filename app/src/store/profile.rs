//! Profile, BMI and daily health summary

use super::HealthStore;
use crate::events::StoreEvent;
use health_tracker_shared::{calculate_bmi, classify_bmi, BmiCategory, Gender, HealthSummary};
use tracing::debug;

impl HealthStore {
    /// Overwrite the profile fields
    ///
    /// No validation happens here; forms check input with
    /// [`ProfileInput::validate`](health_tracker_shared::ProfileInput::validate) first.
    pub fn update_profile(&mut self, name: impl Into<String>, age: u32, gender: Gender, height_cm: f64, weight_kg: f64) {
        self.user.name = name.into();
        self.user.age = age;
        self.user.gender = gender;
        self.user.height_cm = height_cm;
        self.user.weight_kg = weight_kg;
        debug!(user_id = %self.user.id, "Profile updated");
        self.changed(StoreEvent::ProfileUpdated);
    }

    /// BMI of the current profile: weight(kg) / height(m)²
    pub fn calculate_bmi(&self) -> f64 {
        calculate_bmi(self.user.weight_kg, self.user.height_cm)
    }

    pub fn bmi_category(&self) -> BmiCategory {
        classify_bmi(self.calculate_bmi())
    }

    /// Replace today's metrics and stamp them with the current time
    pub fn update_health_summary(
        &mut self,
        steps: u32,
        heart_rate: u32,
        calories: u32,
        sleep_hours: f64,
        water_intake: f64,
    ) {
        self.health_summary = HealthSummary {
            steps,
            heart_rate,
            calories,
            sleep_hours,
            water_intake,
            date: self.now(),
        };
        self.changed(StoreEvent::HealthSummaryUpdated);
    }
}
