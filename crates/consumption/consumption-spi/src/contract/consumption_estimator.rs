//! Trait for point estimation of water consumption

/// Maps an environmental reading to a predicted consumption value in liters.
///
/// Implementations must be pure: the same reading always yields the same
/// value, and no bounds are enforced on the inputs.
pub trait ConsumptionEstimator {
    /// Predict consumption for the given temperature (°C) and rainfall (mm)
    fn predict(&self, temperature: f64, rainfall: f64) -> f64;
}
