//! Aggregate summary model

use serde::{Deserialize, Serialize};

/// Aggregates over every record in a prediction log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of all predicted values (liters)
    pub total_predicted: f64,
    /// Arithmetic mean of the recorded temperatures (°C)
    pub average_temperature: f64,
    /// Arithmetic mean of the recorded rainfall (mm)
    pub average_rainfall: f64,
    /// Number of records summarized
    pub count: usize,
}
