//! Session controller
//!
//! One [`SessionController`] owns everything a single user session needs: the
//! model fitted at start-up, the prediction log, the current input reading,
//! the prediction mode and the premium entitlement gating automatic mode.
//! Nothing is global; a second session is simply a second controller.

use consumption_spi::{
    Advisory, ConsumptionError, ConsumptionEstimator, EstimatorModel, InputBounds, Mode,
    PredictionRecord, PredictionStore, Reading, Result, SessionState, Summary,
};
use tracing::{debug, info, warn};

use crate::analytics::{self, DEFAULT_MAX_REFERENCE};
use crate::estimator;
use crate::export;
use crate::log::PredictionLog;

/// Orchestrates predictions, the log and its analytics for one session.
#[derive(Debug, Clone)]
pub struct SessionController {
    /// Model used for every prediction in this session
    model: EstimatorModel,
    /// Predictions made so far
    log: PredictionLog,
    /// Whether any predictions exist
    state: SessionState,
    /// Current trigger mode
    mode: Mode,
    /// Entitlement flag owned by the payment flow
    premium_active: bool,
    /// Reading currently entered
    reading: Reading,
    /// Ceiling of the efficiency scale
    max_reference: f64,
    /// Optional guard on readings
    input_bounds: Option<InputBounds>,
}

impl SessionController {
    /// Start a session with an already built model.
    pub fn new(model: EstimatorModel) -> Self {
        Self {
            model,
            log: PredictionLog::new(),
            state: SessionState::NoPredictions,
            mode: Mode::Manual,
            premium_active: false,
            reading: Reading::default(),
            max_reference: DEFAULT_MAX_REFERENCE,
            input_bounds: None,
        }
    }

    /// Start a session with a model fitted on the built-in reference data.
    pub fn from_reference() -> Result<Self> {
        Ok(Self::new(estimator::fit_reference()?))
    }

    /// Set the ceiling used by [`SessionController::efficiency_score`].
    ///
    /// Callers validate the value; `SessionConfig` requires it to be positive.
    pub fn with_max_reference(mut self, max_reference: f64) -> Self {
        self.max_reference = max_reference;
        self
    }

    /// Reject readings outside the given bounds
    pub fn with_input_bounds(mut self, bounds: InputBounds) -> Self {
        self.input_bounds = Some(bounds);
        self
    }

    /// Set the initial reading
    pub fn with_reading(mut self, reading: Reading) -> Self {
        self.reading = reading;
        self
    }

    pub fn model(&self) -> &EstimatorModel {
        &self.model
    }

    pub fn log(&self) -> &PredictionLog {
        &self.log
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether introductory content should be displayed
    pub fn show_intro(&self) -> bool {
        self.state.shows_intro()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn premium_active(&self) -> bool {
        self.premium_active
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn max_reference(&self) -> f64 {
        self.max_reference
    }

    pub fn input_bounds(&self) -> Option<&InputBounds> {
        self.input_bounds.as_ref()
    }

    /// Update the premium entitlement.
    ///
    /// Losing the entitlement while in automatic mode drops back to manual.
    pub fn set_premium(&mut self, active: bool) {
        self.premium_active = active;
        if !active && self.mode == Mode::Automatic {
            info!("premium revoked, switching to manual mode");
            self.mode = Mode::Manual;
        }
    }

    /// Switch trigger mode. Automatic mode requires premium.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if mode == Mode::Automatic && !self.premium_active {
            warn!("automatic mode requested without premium");
            return Err(ConsumptionError::PremiumRequired);
        }
        if self.mode != mode {
            info!(from = %self.mode, to = %mode, "prediction mode changed");
        }
        self.mode = mode;
        Ok(())
    }

    /// Predict for an explicit reading and log it.
    ///
    /// This is the discrete trigger; it works in either mode and also makes
    /// the reading current.
    pub fn predict(&mut self, temperature: f64, rainfall: f64) -> Result<PredictionRecord> {
        self.check_bounds(temperature, rainfall)?;
        self.reading = Reading::new(temperature, rainfall);
        Ok(self.record(temperature, rainfall))
    }

    /// Predict for the current reading and log it.
    pub fn trigger(&mut self) -> Result<PredictionRecord> {
        let Reading {
            temperature,
            rainfall,
        } = self.reading;
        self.predict(temperature, rainfall)
    }

    /// Change the current reading.
    ///
    /// In automatic mode a changed reading is predicted and logged right away
    /// and the new record is returned. In manual mode, or when the reading is
    /// unchanged, nothing is logged.
    pub fn update_reading(
        &mut self,
        temperature: f64,
        rainfall: f64,
    ) -> Result<Option<PredictionRecord>> {
        self.check_bounds(temperature, rainfall)?;
        let reading = Reading::new(temperature, rainfall);
        let changed = reading != self.reading;
        self.reading = reading;

        if self.mode == Mode::Automatic && changed {
            Ok(Some(self.record(temperature, rainfall)))
        } else {
            Ok(None)
        }
    }

    /// Predicted value for a reading without logging it
    pub fn estimate(&self, temperature: f64, rainfall: f64) -> f64 {
        self.model.predict(temperature, rainfall)
    }

    /// Log records ordered by temperature
    pub fn snapshot(&self) -> Vec<PredictionRecord> {
        self.log.snapshot()
    }

    /// The most recently appended record
    pub fn latest(&self) -> Option<&PredictionRecord> {
        self.log.latest()
    }

    /// Totals and averages, `None` while the log is empty
    pub fn summary(&self) -> Option<Summary> {
        if self.log.is_empty() {
            return None;
        }
        analytics::summary(self.log.records()).ok()
    }

    pub fn trend_delta(&self) -> Option<f64> {
        analytics::trend_delta(&self.log)
    }

    pub fn efficiency_score(&self, predicted_value: f64) -> f64 {
        analytics::efficiency_score(predicted_value, self.max_reference)
    }

    /// Efficiency score of the latest prediction, if any
    pub fn latest_efficiency_score(&self) -> Option<f64> {
        self.latest().map(|r| self.efficiency_score(r.predicted))
    }

    pub fn advisory(&self, temperature: f64, rainfall: f64) -> Advisory {
        analytics::advisory(temperature, rainfall)
    }

    /// Drop every prediction and return to the no-predictions state.
    pub fn clear(&mut self) {
        self.log.clear();
        self.state = SessionState::NoPredictions;
        info!("session log cleared");
    }

    /// The snapshot rendered as CSV
    pub fn export_csv(&self) -> Result<String> {
        export::to_csv(&self.snapshot())
    }

    fn check_bounds(&self, temperature: f64, rainfall: f64) -> Result<()> {
        for (name, value) in [("temperature", temperature), ("rainfall", rainfall)] {
            if !value.is_finite() {
                return Err(ConsumptionError::NonFiniteInput {
                    name: name.to_string(),
                    value,
                });
            }
        }
        match &self.input_bounds {
            Some(bounds) => bounds.check(temperature, rainfall),
            None => Ok(()),
        }
    }

    fn record(&mut self, temperature: f64, rainfall: f64) -> PredictionRecord {
        let predicted = self.model.predict(temperature, rainfall);
        let record = self.log.append(temperature, rainfall, predicted);
        if self.state == SessionState::NoPredictions {
            debug!("first prediction of the session");
            self.state = SessionState::HasPredictions;
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionController {
        SessionController::new(EstimatorModel::baseline())
    }

    #[test]
    fn test_new_session_shows_intro() {
        let s = session();
        assert_eq!(s.state(), SessionState::NoPredictions);
        assert!(s.show_intro());
        assert_eq!(s.mode(), Mode::Manual);
        assert!(!s.premium_active());
        assert!(s.summary().is_none());
    }

    #[test]
    fn test_predict_records_frozen_value() {
        let mut s = session();
        let record = s.predict(25.0, 100.0).unwrap();

        assert!((record.predicted - s.estimate(25.0, 100.0)).abs() < 1e-12);
        assert_eq!(record.sequence, 1);
        assert_eq!(s.state(), SessionState::HasPredictions);
        assert!(!s.show_intro());
        assert_eq!(s.reading(), Reading::new(25.0, 100.0));
    }

    #[test]
    fn test_clear_resets_state() {
        let mut s = session();
        s.predict(25.0, 100.0).unwrap();
        s.predict(30.0, 80.0).unwrap();
        s.clear();

        assert!(s.log().is_empty());
        assert_eq!(s.trend_delta(), None);
        assert!(s.show_intro());
        assert_eq!(s.predict(20.0, 10.0).unwrap().sequence, 3);
    }

    #[test]
    fn test_manual_mode_ignores_reading_changes() {
        let mut s = session();
        assert_eq!(s.update_reading(30.0, 10.0).unwrap(), None);
        assert!(s.log().is_empty());

        let record = s.trigger().unwrap();
        assert_eq!(record.temperature, 30.0);
        assert_eq!(record.rainfall, 10.0);
    }

    #[test]
    fn test_automatic_mode_requires_premium() {
        let mut s = session();
        assert_eq!(
            s.set_mode(Mode::Automatic),
            Err(ConsumptionError::PremiumRequired)
        );
        assert_eq!(s.mode(), Mode::Manual);

        s.set_premium(true);
        s.set_mode(Mode::Automatic).unwrap();
        assert_eq!(s.mode(), Mode::Automatic);
    }

    #[test]
    fn test_automatic_mode_logs_every_change() {
        let mut s = session();
        s.set_premium(true);
        s.set_mode(Mode::Automatic).unwrap();

        assert!(s.update_reading(26.0, 100.0).unwrap().is_some());
        assert!(s.update_reading(27.0, 100.0).unwrap().is_some());
        // Same reading again is not a change
        assert!(s.update_reading(27.0, 100.0).unwrap().is_none());
        assert_eq!(s.log().len(), 2);
    }

    #[test]
    fn test_revoking_premium_falls_back_to_manual() {
        let mut s = session();
        s.set_premium(true);
        s.set_mode(Mode::Automatic).unwrap();
        s.set_premium(false);

        assert_eq!(s.mode(), Mode::Manual);
        assert!(s.update_reading(40.0, 0.0).unwrap().is_none());
    }

    #[test]
    fn test_input_bounds_guard() {
        let mut s = session().with_input_bounds(InputBounds::original());
        let err = s.predict(75.0, 10.0).unwrap_err();
        assert!(matches!(err, ConsumptionError::InvalidInputRange { .. }));
        assert!(s.log().is_empty());
        assert!(s.show_intro());

        let mut unbounded = session();
        assert!(unbounded.predict(75.0, 10.0).is_ok());
    }

    #[test]
    fn test_non_finite_readings_rejected() {
        let mut s = session();
        let err = s.predict(f64::NAN, 10.0).unwrap_err();
        assert!(matches!(
            err,
            ConsumptionError::NonFiniteInput { ref name, .. } if name == "temperature"
        ));

        s.set_premium(true);
        s.set_mode(Mode::Automatic).unwrap();
        let err = s.update_reading(20.0, f64::INFINITY).unwrap_err();
        assert!(matches!(
            err,
            ConsumptionError::NonFiniteInput { ref name, .. } if name == "rainfall"
        ));

        assert!(s.log().is_empty());
        assert_eq!(s.reading(), Reading::default());
    }

    #[test]
    fn test_efficiency_uses_configured_ceiling() {
        let s = session().with_max_reference(200.0);
        assert_eq!(s.efficiency_score(100.0), 50.0);
        assert_eq!(s.efficiency_score(250.0), 0.0);
    }

    #[test]
    fn test_latest_efficiency_score() {
        let mut s = session();
        assert_eq!(s.latest_efficiency_score(), None);
        // 50 + 2*25 + 0.3*0 = 100 liters
        s.predict(25.0, 0.0).unwrap();
        let score = s.latest_efficiency_score().unwrap();
        assert!((score - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_from_reference_fits_once() {
        let s = SessionController::from_reference().unwrap();
        assert!(s.model().is_fitted());
        assert_eq!(s.model().n_observations(), 5);
    }
}
