//! Built-in calibration data

use consumption_spi::Observation;

/// Fixed reference observations the default model is fitted on.
///
/// Rainfall rises in step with temperature across these points, so the two
/// input columns are collinear; the fit resolves that with the minimum-norm
/// solution (see [`crate::estimator::fit`]).
pub const REFERENCE_OBSERVATIONS: [Observation; 5] = [
    Observation::new(20.0, 0.0, 80.0),
    Observation::new(25.0, 50.0, 120.0),
    Observation::new(30.0, 100.0, 160.0),
    Observation::new(35.0, 150.0, 200.0),
    Observation::new(40.0, 200.0, 260.0),
];
