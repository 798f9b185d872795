//! Conservation advisory classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Advice category for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Advisory {
    LowRainfall,
    HighTemperature,
    Moderate,
}

impl Advisory {
    /// Stable identifier, e.g. `LOW_RAINFALL`
    pub fn label(self) -> &'static str {
        match self {
            Advisory::LowRainfall => "LOW_RAINFALL",
            Advisory::HighTemperature => "HIGH_TEMPERATURE",
            Advisory::Moderate => "MODERATE",
        }
    }

    /// Human-readable advice for the category
    pub fn message(self) -> &'static str {
        match self {
            Advisory::LowRainfall => {
                "Low rainfall: store water and limit irrigation to essential use."
            }
            Advisory::HighTemperature => {
                "High temperature: expect higher demand, water early or late in the day."
            }
            Advisory::Moderate => "Conditions are moderate: keep up normal conservation habits.",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
