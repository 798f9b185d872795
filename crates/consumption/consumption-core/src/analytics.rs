//! Log analytics
//!
//! Stateless functions over a prediction log or a snapshot of it.

use consumption_spi::{
    Advisory, ConsumptionError, PredictionRecord, PredictionStore, Result, Summary,
};

/// Consumption (liters) treated as the ceiling of the efficiency scale.
///
/// A fixed configuration value for "maximum expected consumption", not a
/// statistic of the data.
pub const DEFAULT_MAX_REFERENCE: f64 = 300.0;

/// Rainfall (mm) below which a reading is classified [`Advisory::LowRainfall`]
pub const LOW_RAINFALL_THRESHOLD: f64 = 50.0;

/// Temperature (°C) above which a reading is classified [`Advisory::HighTemperature`]
pub const HIGH_TEMPERATURE_THRESHOLD: f64 = 35.0;

/// Change between the two most recent predictions, `previous - latest`.
///
/// Positive means usage went down. `None` until the log holds two records.
pub fn trend_delta<S: PredictionStore + ?Sized>(log: &S) -> Option<f64> {
    log.latest_two_by_sequence()
        .map(|(previous, latest)| previous.predicted - latest.predicted)
}

/// Totals and averages over the records.
///
/// Callers are expected to check for an empty log first; an empty slice is a
/// precondition violation reported as [`ConsumptionError::EmptyLog`].
pub fn summary(records: &[PredictionRecord]) -> Result<Summary> {
    if records.is_empty() {
        return Err(ConsumptionError::EmptyLog);
    }

    let n = records.len() as f64;
    let total_predicted = records.iter().map(|r| r.predicted).sum();
    let average_temperature = records.iter().map(|r| r.temperature).sum::<f64>() / n;
    let average_rainfall = records.iter().map(|r| r.rainfall).sum::<f64>() / n;

    Ok(Summary {
        total_predicted,
        average_temperature,
        average_rainfall,
        count: records.len(),
    })
}

/// Score in `[0, 100]`: 100 for no consumption, 0 at or above `max_reference`.
///
/// A NaN value or ceiling, or `0 / 0`, scores 0.
pub fn efficiency_score(predicted_value: f64, max_reference: f64) -> f64 {
    let score = (1.0 - predicted_value / max_reference) * 100.0;
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Classify a reading. Low rainfall takes precedence over high temperature.
pub fn advisory(temperature: f64, rainfall: f64) -> Advisory {
    if rainfall < LOW_RAINFALL_THRESHOLD {
        Advisory::LowRainfall
    } else if temperature > HIGH_TEMPERATURE_THRESHOLD {
        Advisory::HighTemperature
    } else {
        Advisory::Moderate
    }
}
