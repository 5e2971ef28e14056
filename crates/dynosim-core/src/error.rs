//! Error types for the simulation pipeline

use thiserror::Error;

/// Result alias used throughout the crate
pub type SimResult<T> = Result<T, SimulationError>;

/// Errors that can occur while normalizing, simulating or persisting an engine
#[derive(Error, Debug)]
pub enum SimulationError {
    /// A field is missing, unparseable, or violates its constraint
    #[error("Invalid value for '{field}': {reason}")]
    Validation {
        /// Canonical name of the field
        field: String,
        /// What is wrong with its value
        reason: String,
    },

    /// The input is well formed but the model formulas are undefined for it
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Preset content is not a flat JSON object
    #[error("Preset format error")]
    PresetFormat(#[from] serde_json::Error),

    /// Reading or writing a preset failed
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SimulationError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::validation(field, "required field is missing")
    }

    /// Name of the offending field for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            SimulationError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
