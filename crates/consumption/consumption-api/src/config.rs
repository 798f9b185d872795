//! Session configuration types.

use consumption_core::analytics::DEFAULT_MAX_REFERENCE;
use consumption_core::{estimator, SessionController};
use consumption_spi::{
    ConsumptionError, EstimatorModel, InputBounds, Mode, Observation, Reading, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Where a session's model comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSource {
    /// Least-squares fit over the built-in reference observations
    #[default]
    Reference,
    /// Fixed formula `50 + 2.0 * temperature + 0.3 * rainfall`, no fitting
    Baseline,
    /// Least-squares fit over caller-supplied observations
    Custom(Vec<Observation>),
}

/// Configuration for building a [`SessionController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Model source
    pub model: ModelSource,
    /// Ceiling of the efficiency scale in liters
    pub max_reference: f64,
    /// Reject readings outside these bounds (unchecked when absent)
    pub input_bounds: Option<InputBounds>,
    /// Premium entitlement at session start
    pub premium: bool,
    /// Trigger mode at session start
    pub mode: Mode,
    /// Reading entered at session start
    pub initial_reading: Reading,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: ModelSource::Reference,
            max_reference: DEFAULT_MAX_REFERENCE,
            input_bounds: None,
            premium: false,
            mode: Mode::Manual,
            initial_reading: Reading::default(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConsumptionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ConsumptionError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loaded session config");
        Self::from_json(&json)
    }

    /// Check the values a session cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_reference.is_finite() && self.max_reference > 0.0) {
            return Err(ConsumptionError::Config(format!(
                "max_reference must be a positive number, got {}",
                self.max_reference
            )));
        }

        let reading = self.initial_reading;
        if !(reading.temperature.is_finite() && reading.rainfall.is_finite()) {
            return Err(ConsumptionError::Config(
                "initial_reading must be finite".to_string(),
            ));
        }

        if let Some(bounds) = &self.input_bounds {
            if !bounds.is_valid() {
                return Err(ConsumptionError::Config(
                    "input_bounds must be finite with min <= max".to_string(),
                ));
            }
            bounds
                .check(reading.temperature, reading.rainfall)
                .map_err(|e| ConsumptionError::Config(format!("initial_reading: {}", e)))?;
        }

        if self.mode == Mode::Automatic && !self.premium {
            return Err(ConsumptionError::Config(
                "automatic mode requires premium".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the model this configuration describes.
    pub fn build_model(&self) -> Result<EstimatorModel> {
        match &self.model {
            ModelSource::Reference => estimator::fit_reference(),
            ModelSource::Baseline => Ok(EstimatorModel::baseline()),
            ModelSource::Custom(observations) => estimator::fit(observations),
        }
    }

    /// Validate, build the model once and start a session with it.
    pub fn build_session(&self) -> Result<SessionController> {
        self.validate()?;
        let mut session = SessionController::new(self.build_model()?)
            .with_max_reference(self.max_reference)
            .with_reading(self.initial_reading);
        if let Some(bounds) = self.input_bounds {
            session = session.with_input_bounds(bounds);
        }
        session.set_premium(self.premium);
        session.set_mode(self.mode)?;
        Ok(session)
    }
}

/// Builder for SessionConfig.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    model: Option<ModelSource>,
    max_reference: Option<f64>,
    input_bounds: Option<InputBounds>,
    premium: bool,
    mode: Option<Mode>,
    initial_reading: Option<Reading>,
}

impl SessionConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model source.
    pub fn model(mut self, model: ModelSource) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the efficiency ceiling.
    pub fn max_reference(mut self, max_reference: f64) -> Self {
        self.max_reference = Some(max_reference);
        self
    }

    /// Enforce input bounds.
    pub fn input_bounds(mut self, bounds: InputBounds) -> Self {
        self.input_bounds = Some(bounds);
        self
    }

    /// Set the premium entitlement.
    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    /// Set the starting mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the starting reading.
    pub fn initial_reading(mut self, reading: Reading) -> Self {
        self.initial_reading = Some(reading);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<SessionConfig> {
        let defaults = SessionConfig::default();
        let config = SessionConfig {
            model: self.model.unwrap_or(defaults.model),
            max_reference: self.max_reference.unwrap_or(defaults.max_reference),
            input_bounds: self.input_bounds,
            premium: self.premium,
            mode: self.mode.unwrap_or(defaults.mode),
            initial_reading: self.initial_reading.unwrap_or(defaults.initial_reading),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consumption_spi::ConsumptionEstimator;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_reference, 300.0);
        assert_eq!(config.model, ModelSource::Reference);
        assert_eq!(config.initial_reading, Reading::new(25.0, 100.0));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SessionConfig::from_json(r#"{"model": "baseline", "premium": true}"#).unwrap();
        assert_eq!(config.model, ModelSource::Baseline);
        assert!(config.premium);
        assert_eq!(config.mode, Mode::Manual);
        assert_eq!(config.max_reference, DEFAULT_MAX_REFERENCE);
    }

    #[test]
    fn test_from_json_custom_observations() {
        let json = r#"{
            "model": {"custom": [
                {"temperature": 10.0, "rainfall": 0.0, "consumption": 70.0},
                {"temperature": 20.0, "rainfall": 0.0, "consumption": 90.0},
                {"temperature": 20.0, "rainfall": 100.0, "consumption": 120.0}
            ]}
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        let model = config.build_model().unwrap();
        assert!((model.predict(0.0, 0.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = SessionConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConsumptionError::Config(_)));
    }

    #[test]
    fn test_non_positive_max_reference_rejected() {
        let err = SessionConfigBuilder::new()
            .max_reference(0.0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("max_reference"));
    }

    #[test]
    fn test_automatic_without_premium_rejected() {
        let result = SessionConfigBuilder::new().mode(Mode::Automatic).build();
        assert!(result.is_err());

        let config = SessionConfigBuilder::new()
            .premium(true)
            .mode(Mode::Automatic)
            .build()
            .unwrap();
        let session = config.build_session().unwrap();
        assert_eq!(session.mode(), Mode::Automatic);
    }

    #[test]
    fn test_initial_reading_must_respect_bounds() {
        let result = SessionConfigBuilder::new()
            .input_bounds(InputBounds::original())
            .initial_reading(Reading::new(70.0, 10.0))
            .build();
        assert!(matches!(result, Err(ConsumptionError::Config(_))));
    }

    #[test]
    fn test_custom_degenerate_model_surfaces_error() {
        let config = SessionConfigBuilder::new()
            .model(ModelSource::Custom(vec![Observation::new(20.0, 10.0, 80.0)]))
            .build()
            .unwrap();
        let err = config.build_session().unwrap_err();
        assert!(matches!(err, ConsumptionError::DegenerateInput { .. }));
    }

    #[test]
    fn test_build_session_applies_settings() {
        let config = SessionConfigBuilder::new()
            .model(ModelSource::Baseline)
            .max_reference(500.0)
            .input_bounds(InputBounds::original())
            .initial_reading(Reading::new(30.0, 20.0))
            .build()
            .unwrap();
        let session = config.build_session().unwrap();

        assert_eq!(session.max_reference(), 500.0);
        assert_eq!(session.reading(), Reading::new(30.0, 20.0));
        assert!(session.input_bounds().is_some());
        assert!(!session.model().is_fitted());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = SessionConfigBuilder::new()
            .model(ModelSource::Baseline)
            .input_bounds(InputBounds::original())
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SessionConfig::from_json(&json).unwrap(), config);
    }
}
