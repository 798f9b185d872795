//! Input reading model

use serde::{Deserialize, Serialize};

/// The (temperature, rainfall) pair currently entered for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in °C
    pub temperature: f64,
    /// Rainfall in mm
    pub rainfall: f64,
}

impl Reading {
    pub const fn new(temperature: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            rainfall,
        }
    }
}

impl Default for Reading {
    /// 25 °C and 100 mm, the starting values of the input controls
    fn default() -> Self {
        Self::new(25.0, 100.0)
    }
}
