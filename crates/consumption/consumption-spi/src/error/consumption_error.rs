//! Consumption error types
//!
//! Defines the standardized error type for estimator, log and session operations.

use thiserror::Error;

/// Result type alias for consumption operations
pub type Result<T> = std::result::Result<T, ConsumptionError>;

/// Errors that can occur while fitting, predicting or summarizing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsumptionError {
    /// The reference observations cannot determine a model
    #[error("Degenerate input: {reason}")]
    DegenerateInput { reason: String },

    /// Analytics were requested on a log with no records
    #[error("Prediction log is empty")]
    EmptyLog,

    /// A reading fell outside the configured input bounds
    #[error("Input '{name}' out of range: {value} not in [{min}, {max}]")]
    InvalidInputRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A reading was NaN or infinite
    #[error("Input '{name}' must be a finite number, got {value}")]
    NonFiniteInput { name: String, value: f64 },

    /// Automatic mode was requested without a premium entitlement
    #[error("Automatic mode requires an active premium plan")]
    PremiumRequired,

    /// The prediction log could not be serialized
    #[error("Export failed: {0}")]
    Export(String),

    /// The session configuration is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ConsumptionError {
    /// Shorthand for a [`ConsumptionError::DegenerateInput`] with the given reason.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }
}
