//! Data models for the Health Tracker application

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Gender as entered on the profile screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
}

impl User {
    pub fn new(name: impl Into<String>, age: u32, gender: Gender, height_cm: f64, weight_kg: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            gender,
            height_cm,
            weight_kg,
        }
    }
}

/// A scheduled doctor visit
///
/// Two appointments are equal when they share an identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub title: String,
    pub doctor: String,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_completed: bool,
}

impl Appointment {
    pub fn new(
        title: impl Into<String>,
        doctor: impl Into<String>,
        date: DateTime<Utc>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            doctor: doctor.into(),
            date,
            location: location.into(),
            notes: None,
            is_completed: false,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl PartialEq for Appointment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Appointment {}

/// Time-of-day bucket a medication belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Display order used when grouping medications
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// When a medication is taken relative to meals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodRelation {
    #[serde(rename = "Before Food")]
    BeforeFood,
    #[serde(rename = "After Food")]
    AfterFood,
    None,
}

impl FoodRelation {
    /// Display order used when grouping medications
    pub const ALL: [FoodRelation; 3] = [
        FoodRelation::BeforeFood,
        FoodRelation::AfterFood,
        FoodRelation::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FoodRelation::BeforeFood => "Before Food",
            FoodRelation::AfterFood => "After Food",
            FoodRelation::None => "None",
        }
    }
}

impl fmt::Display for FoodRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A medication with its daily reminder times
///
/// Two medications are equal when they share an identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    /// Free-form label such as "Daily" or "As needed"
    pub frequency: String,
    /// Clock times for the recurring reminders, in display order
    pub reminder_times: Vec<NaiveTime>,
    pub time_of_day: TimeOfDay,
    pub food_relation: FoodRelation,
    pub is_taken: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_taken: Option<DateTime<Utc>>,
}

impl Medication {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        reminder_times: Vec<NaiveTime>,
        time_of_day: TimeOfDay,
        food_relation: FoodRelation,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            reminder_times,
            time_of_day,
            food_relation,
            is_taken: false,
            last_taken: None,
        }
    }
}

impl PartialEq for Medication {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Medication {}

/// Daily health metrics shown on the home screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub steps: u32,
    /// Beats per minute
    pub heart_rate: u32,
    pub calories: u32,
    pub sleep_hours: f64,
    /// Water intake in liters
    pub water_intake: f64,
    pub date: DateTime<Utc>,
}

/// One bucket of [`Medication`]s sharing a time of day and food relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationGroup {
    pub time_of_day: TimeOfDay,
    pub food_relation: FoodRelation,
    pub medications: Vec<Medication>,
}
