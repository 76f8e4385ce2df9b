//! Error types for the Health Tracker application

use thiserror::Error;

/// Application-wide error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {field}: {message}")]
    Validation { field: &'static str, message: String },
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            AppError::Validation { field, .. } => field,
        }
    }
}
