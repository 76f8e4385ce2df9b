//! Input validation functions
//!
//! The store overwrites whatever it is given, so forms run these checks
//! before forwarding user input.

use crate::errors::AppError;
use crate::models::Gender;

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if age > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than 0".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm <= 0.0 {
        return Err("Height must be greater than 0".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate a non-negative measurement such as sleep hours or liters
pub fn validate_non_negative(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Value must be a valid number".to_string());
    }
    if value < 0.0 {
        return Err("Value cannot be negative".to_string());
    }
    Ok(())
}

/// Validate sleep duration in hours
pub fn validate_sleep_hours(hours: f64) -> Result<(), String> {
    validate_non_negative(hours)?;
    if hours > 24.0 {
        return Err("Sleep cannot exceed 24 hours".to_string());
    }
    Ok(())
}

// ============================================================================
// Form Input
// ============================================================================

/// Profile edit form
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInput {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl ProfileInput {
    /// Check every field, reporting the first failure
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name(&self.name).map_err(|e| AppError::validation("name", e))?;
        validate_age(self.age).map_err(|e| AppError::validation("age", e))?;
        validate_height_cm(self.height_cm).map_err(|e| AppError::validation("height", e))?;
        validate_weight(self.weight_kg).map_err(|e| AppError::validation("weight", e))?;
        Ok(())
    }
}

/// Health summary edit form
#[derive(Debug, Clone, PartialEq)]
pub struct HealthSummaryInput {
    pub steps: u32,
    pub heart_rate: u32,
    pub calories: u32,
    pub sleep_hours: f64,
    pub water_intake: f64,
}

impl HealthSummaryInput {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_sleep_hours(self.sleep_hours).map_err(|e| AppError::validation("sleep_hours", e))?;
        validate_non_negative(self.water_intake)
            .map_err(|e| AppError::validation("water_intake", e))?;
        Ok(())
    }
}
