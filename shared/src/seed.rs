//! Sample data compiled into the app
//!
//! Appointment dates are relative to the `now` passed in so the sample list
//! always has upcoming entries.

use crate::models::{
    Appointment, FoodRelation, Gender, HealthSummary, Medication, TimeOfDay, User,
};
use chrono::{DateTime, Duration, NaiveTime, Utc};

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub fn sample_user() -> User {
    User::new("Alex Morgan", 34, Gender::Male, 175.0, 70.0)
}

pub fn sample_appointments(now: DateTime<Utc>) -> Vec<Appointment> {
    vec![
        Appointment::new(
            "Annual Checkup",
            "Dr. Sarah Johnson",
            now + Duration::days(1),
            "City Medical Center",
        )
        .with_notes("Bring your recent blood test results"),
        Appointment::new(
            "Dental Cleaning",
            "Dr. Michael Chen",
            now + Duration::days(2),
            "Bright Smile Dental",
        )
        .with_notes("Regular cleaning and checkup"),
        Appointment::new(
            "Cardiology Consultation",
            "Dr. Emily Rodriguez",
            now + Duration::days(7),
            "Heart Care Institute",
        )
        .with_notes("Follow-up appointment"),
    ]
}

pub fn sample_medications() -> Vec<Medication> {
    vec![
        Medication::new(
            "Vitamin D3",
            "1000 IU",
            "Daily",
            vec![clock(8, 0)],
            TimeOfDay::Morning,
            FoodRelation::AfterFood,
        ),
        Medication::new(
            "Omega-3",
            "1000 mg",
            "Daily",
            vec![clock(18, 0)],
            TimeOfDay::Evening,
            FoodRelation::BeforeFood,
        ),
        Medication::new(
            "Blood Pressure Medication",
            "10 mg",
            "Daily",
            vec![clock(8, 0), clock(20, 0)],
            TimeOfDay::Morning,
            FoodRelation::BeforeFood,
        ),
        Medication::new(
            "Sleep Aid",
            "5 mg",
            "As needed",
            vec![clock(22, 0)],
            TimeOfDay::Night,
            FoodRelation::None,
        ),
    ]
}

pub fn sample_health_summary(now: DateTime<Utc>) -> HealthSummary {
    HealthSummary {
        steps: 8420,
        heart_rate: 72,
        calories: 1850,
        sleep_hours: 7.5,
        water_intake: 2.1,
        date: now,
    }
}
