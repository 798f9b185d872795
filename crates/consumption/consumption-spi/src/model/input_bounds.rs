//! Optional range guard for input readings

use crate::error::{ConsumptionError, Result};
use serde::{Deserialize, Serialize};

/// Inclusive ranges a reading must fall into when a session enforces bounds.
///
/// Sessions accept any reading by default; extrapolation outside the
/// reference data is allowed. Bounds are an opt-in guard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub rainfall_min: f64,
    pub rainfall_max: f64,
}

impl InputBounds {
    /// Ranges of the original input controls: 0..=60 °C and 0..=500 mm
    pub fn original() -> Self {
        Self {
            temperature_min: 0.0,
            temperature_max: 60.0,
            rainfall_min: 0.0,
            rainfall_max: 500.0,
        }
    }

    /// Check both inputs, reporting the first one out of range
    pub fn check(&self, temperature: f64, rainfall: f64) -> Result<()> {
        check_one("temperature", temperature, self.temperature_min, self.temperature_max)?;
        check_one("rainfall", rainfall, self.rainfall_min, self.rainfall_max)
    }

    /// Whether every limit is finite and each range is non-empty
    pub fn is_valid(&self) -> bool {
        [
            self.temperature_min,
            self.temperature_max,
            self.rainfall_min,
            self.rainfall_max,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.temperature_min <= self.temperature_max
            && self.rainfall_min <= self.rainfall_max
    }
}

fn check_one(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    // NaN fails both comparisons, so test for containment instead of exclusion
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConsumptionError::InvalidInputRange {
            name: name.to_string(),
            value,
            min,
            max,
        })
    }
}
