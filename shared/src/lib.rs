//! Health Tracker Shared Library
//!
//! This crate contains the domain entities, BMI metrics, input validation
//! and sample data used by the app crate and by presentation code.

pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod seed;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use models::{
    Appointment, FoodRelation, Gender, HealthSummary, Medication, MedicationGroup, TimeOfDay,
    User,
};
pub use validation::{HealthSummaryInput, ProfileInput};
