//! Least-squares fitting of the consumption model
//!
//! Uses ordinary least squares (OLS) over two regressors, temperature and
//! rainfall, plus an intercept:
//!
//! ```text
//! predicted = a * temperature + b * rainfall + c
//! ```
//!
//! The inputs are centred before solving, which reduces the problem to the
//! 2x2 normal equations for `(a, b)`; `c` follows from the means.
//!
//! ## Degenerate inputs
//!
//! - Fewer than two observations, or non-finite values: rejected.
//! - Every observation at the same (temperature, rainfall) pair: rejected,
//!   no slope can be determined.
//! - Collinear inputs (rainfall a linear function of temperature): the
//!   minimum-norm least-squares solution is returned, so predictions along
//!   the observed line are exact.

use consumption_spi::{ConsumptionError, EstimatorModel, Observation, Result};
use tracing::{debug, warn};

use crate::reference::REFERENCE_OBSERVATIONS;

/// Relative threshold below which the input spread or the normal-equation
/// determinant is treated as zero.
const SINGULARITY_TOLERANCE: f64 = 1e-10;

/// Fit a linear model to the observations.
///
/// # Errors
///
/// [`ConsumptionError::DegenerateInput`] for fewer than two observations, a
/// non-finite value, or inputs that all share one (temperature, rainfall)
/// pair.
///
/// Rank-one inputs are not an error. A strict rank rule would reject any
/// dataset whose rainfall moves in lockstep with temperature, including
/// [`REFERENCE_OBSERVATIONS`]; this function departs from that rule and
/// returns the minimum-norm solution instead, which predicts exactly along
/// the observed line when the observations are consistent with it.
///
/// # Example
///
/// ```rust
/// use consumption_core::{fit, ConsumptionEstimator, Observation};
///
/// let data = [
///     Observation::new(10.0, 0.0, 70.0),
///     Observation::new(20.0, 0.0, 90.0),
///     Observation::new(20.0, 100.0, 120.0),
/// ];
/// let model = fit(&data).unwrap();
/// assert!((model.predict(15.0, 50.0) - 95.0).abs() < 1e-9);
/// ```
pub fn fit(observations: &[Observation]) -> Result<EstimatorModel> {
    if observations.len() < 2 {
        warn!(count = observations.len(), "not enough observations to fit");
        return Err(ConsumptionError::degenerate(format!(
            "need at least 2 observations, got {}",
            observations.len()
        )));
    }

    if let Some(index) = observations.iter().position(|o| !o.is_finite()) {
        return Err(ConsumptionError::degenerate(format!(
            "observation {} contains a non-finite value",
            index
        )));
    }

    let n = observations.len() as f64;
    let mean_t = observations.iter().map(|o| o.temperature).sum::<f64>() / n;
    let mean_r = observations.iter().map(|o| o.rainfall).sum::<f64>() / n;
    let mean_y = observations.iter().map(|o| o.consumption).sum::<f64>() / n;

    // Centred sums of squares and cross products
    let mut s_tt = 0.0;
    let mut s_rr = 0.0;
    let mut s_tr = 0.0;
    let mut s_ty = 0.0;
    let mut s_ry = 0.0;
    for o in observations {
        let t = o.temperature - mean_t;
        let r = o.rainfall - mean_r;
        let y = o.consumption - mean_y;
        s_tt += t * t;
        s_rr += r * r;
        s_tr += t * r;
        s_ty += t * y;
        s_ry += r * y;
    }

    let spread = s_tt + s_rr;
    let magnitude = n * (1.0 + mean_t * mean_t + mean_r * mean_r);
    if spread <= SINGULARITY_TOLERANCE * SINGULARITY_TOLERANCE * magnitude {
        warn!("all observations share one input pair");
        return Err(ConsumptionError::degenerate(
            "all observations share the same temperature and rainfall",
        ));
    }

    let det = s_tt * s_rr - s_tr * s_tr;
    let (a, b) = if det > SINGULARITY_TOLERANCE * s_tt * s_rr {
        (
            (s_ty * s_rr - s_ry * s_tr) / det,
            (s_ry * s_tt - s_ty * s_tr) / det,
        )
    } else {
        // Rank one: the normal matrix is spread * u u^T, whose pseudo-inverse
        // is itself divided by spread squared.
        debug!("input columns are collinear, using minimum-norm solution");
        let scale = spread * spread;
        (
            (s_tt * s_ty + s_tr * s_ry) / scale,
            (s_tr * s_ty + s_rr * s_ry) / scale,
        )
    };
    let c = mean_y - a * mean_t - b * mean_r;

    // Calculate R-squared
    let ss_tot: f64 = observations
        .iter()
        .map(|o| (o.consumption - mean_y).powi(2))
        .sum();
    let ss_res: f64 = observations
        .iter()
        .map(|o| {
            let predicted = a * o.temperature + b * o.rainfall + c;
            (o.consumption - predicted).powi(2)
        })
        .sum();
    let r_squared = if ss_tot > SINGULARITY_TOLERANCE {
        1.0 - ss_res / ss_tot
    } else {
        1.0
    };

    debug!(
        temperature_coef = a,
        rainfall_coef = b,
        intercept = c,
        r_squared,
        "fitted consumption model"
    );

    Ok(EstimatorModel::new(a, b, c).with_fit_stats(observations.len(), r_squared))
}

/// Fit the model on the built-in [`REFERENCE_OBSERVATIONS`].
pub fn fit_reference() -> Result<EstimatorModel> {
    fit(&REFERENCE_OBSERVATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use consumption_spi::ConsumptionEstimator;

    fn plane(t: f64, r: f64) -> f64 {
        50.0 + 2.0 * t + 0.3 * r
    }

    #[test]
    fn test_recovers_exact_plane() {
        let data: Vec<Observation> = [(10.0, 0.0), (20.0, 40.0), (30.0, 10.0), (15.0, 200.0)]
            .iter()
            .map(|&(t, r)| Observation::new(t, r, plane(t, r)))
            .collect();

        let model = fit(&data).unwrap();
        assert!((model.temperature_coef() - 2.0).abs() < 1e-9);
        assert!((model.rainfall_coef() - 0.3).abs() < 1e-9);
        assert!((model.intercept() - 50.0).abs() < 1e-9);
        assert!(model.r_squared().unwrap() > 0.999_999);
        assert_eq!(model.n_observations(), 4);
    }

    #[test]
    fn test_reference_reproduces_calibration_point() {
        let model = fit_reference().unwrap();
        assert!((model.predict(25.0, 50.0) - 120.0).abs() < 1e-9);
        assert!((model.predict(30.0, 100.0) - 164.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_fit_is_deterministic() {
        let first = fit_reference().unwrap();
        let second = fit_reference().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.predict(33.3, 12.5).to_bits(),
            second.predict(33.3, 12.5).to_bits()
        );
    }

    #[test]
    fn test_collinear_inputs_use_minimum_norm() {
        let model = fit_reference().unwrap();
        // Rainfall = 10 * temperature - 200 along the data, so the slope along
        // the line (a + 10b) is 8.8 and the minimum-norm split is (1, 10) / 101.
        assert!((model.temperature_coef() - 8.8 / 101.0).abs() < 1e-9);
        assert!((model.rainfall_coef() - 88.0 / 101.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_rainfall_gives_zero_rainfall_coef() {
        let data = [
            Observation::new(10.0, 5.0, 30.0),
            Observation::new(20.0, 5.0, 50.0),
            Observation::new(30.0, 5.0, 70.0),
        ];
        let model = fit(&data).unwrap();
        assert!((model.temperature_coef() - 2.0).abs() < 1e-9);
        assert!(model.rainfall_coef().abs() < 1e-12);
        assert!((model.predict(40.0, 999.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_observations() {
        let err = fit(&[Observation::new(20.0, 0.0, 80.0)]).unwrap_err();
        assert!(matches!(err, ConsumptionError::DegenerateInput { .. }));
        assert!(fit(&[]).is_err());
    }

    #[test]
    fn test_identical_inputs_are_degenerate() {
        let data = [
            Observation::new(0.1, 0.7, 10.0),
            Observation::new(0.1, 0.7, 12.0),
            Observation::new(0.1, 0.7, 11.0),
        ];
        let err = fit(&data).unwrap_err();
        assert_eq!(
            err,
            ConsumptionError::degenerate("all observations share the same temperature and rainfall")
        );
    }

    #[test]
    fn test_non_finite_observation_rejected() {
        let data = [
            Observation::new(20.0, 0.0, 80.0),
            Observation::new(25.0, f64::NAN, 120.0),
        ];
        let err = fit(&data).unwrap_err();
        assert!(err.to_string().contains("observation 1"));
    }

    #[test]
    fn test_constant_consumption_has_unit_r_squared() {
        let data = [
            Observation::new(10.0, 0.0, 100.0),
            Observation::new(20.0, 50.0, 100.0),
            Observation::new(30.0, 20.0, 100.0),
        ];
        let model = fit(&data).unwrap();
        assert_eq!(model.r_squared(), Some(1.0));
        assert!((model.predict(55.0, 300.0) - 100.0).abs() < 1e-9);
    }
}
