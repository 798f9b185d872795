//! Fitted linear consumption model

use crate::contract::ConsumptionEstimator;
use serde::{Deserialize, Serialize};

/// Linear model over two inputs.
///
/// Predicts `temperature_coef * temperature + rainfall_coef * rainfall + intercept`.
/// Instances are immutable once built; a session fits one at start-up and
/// keeps it for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorModel {
    /// Liters per °C
    temperature_coef: f64,
    /// Liters per mm of rainfall
    rainfall_coef: f64,
    /// Liters at 0 °C and 0 mm
    intercept: f64,
    /// Number of observations used in fitting (0 for fixed models)
    n_observations: usize,
    /// Coefficient of determination over the fitting data, if fitted
    r_squared: Option<f64>,
}

impl EstimatorModel {
    /// Base consumption of the fixed formula, in liters
    pub const BASELINE_INTERCEPT: f64 = 50.0;
    /// Liters added per °C by the fixed formula
    pub const BASELINE_TEMPERATURE_COEF: f64 = 2.0;
    /// Liters added per mm of rainfall by the fixed formula
    pub const BASELINE_RAINFALL_COEF: f64 = 0.3;

    /// Create a model from explicit coefficients
    pub fn new(temperature_coef: f64, rainfall_coef: f64, intercept: f64) -> Self {
        Self {
            temperature_coef,
            rainfall_coef,
            intercept,
            n_observations: 0,
            r_squared: None,
        }
    }

    /// The fixed formula `50 + 2.0 * temperature + 0.3 * rainfall`, used when
    /// no calibration is wanted.
    pub fn baseline() -> Self {
        Self::new(
            Self::BASELINE_TEMPERATURE_COEF,
            Self::BASELINE_RAINFALL_COEF,
            Self::BASELINE_INTERCEPT,
        )
    }

    /// Attach goodness-of-fit information produced by a fitting routine
    pub fn with_fit_stats(mut self, n_observations: usize, r_squared: f64) -> Self {
        self.n_observations = n_observations;
        self.r_squared = Some(r_squared);
        self
    }

    pub fn temperature_coef(&self) -> f64 {
        self.temperature_coef
    }

    pub fn rainfall_coef(&self) -> f64 {
        self.rainfall_coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// R-squared of the fit, `None` for models built from fixed coefficients
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// Whether the coefficients came from a least-squares fit
    pub fn is_fitted(&self) -> bool {
        self.r_squared.is_some()
    }
}

impl ConsumptionEstimator for EstimatorModel {
    fn predict(&self, temperature: f64, rainfall: f64) -> f64 {
        self.temperature_coef * temperature + self.rainfall_coef * rainfall + self.intercept
    }
}
