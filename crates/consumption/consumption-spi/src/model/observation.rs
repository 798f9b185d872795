//! Reference observation model

use serde::{Deserialize, Serialize};

/// One calibration point: an input reading and the consumption observed for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Temperature in °C
    pub temperature: f64,
    /// Rainfall in mm
    pub rainfall: f64,
    /// Observed water consumption in liters
    pub consumption: f64,
}

impl Observation {
    pub const fn new(temperature: f64, rainfall: f64, consumption: f64) -> Self {
        Self {
            temperature,
            rainfall,
            consumption,
        }
    }

    /// Whether every field is a finite number
    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.rainfall.is_finite() && self.consumption.is_finite()
    }
}
