//! Consumption Consumer API
//!
//! Consumer configuration and builder APIs for estimator sessions.
//!
//! This crate provides:
//! - [`SessionConfig`] and its builder, loadable from JSON
//! - [`ModelSource`] to choose between the fitted and the fixed model
//! - Re-exports from SPI and core for convenience

pub mod config;

pub use config::{ModelSource, SessionConfig, SessionConfigBuilder};

// Re-export from core
pub use consumption_core::{
    analytics, estimator, export, fit, fit_reference, log, reference, session, PredictionLog,
    SessionController, REFERENCE_OBSERVATIONS,
};

// Re-export from SPI
pub use consumption_spi::{
    Advisory, ConsumptionError, ConsumptionEstimator, EstimatorModel, InputBounds, Mode,
    Observation, PredictionRecord, PredictionStore, Reading, Result, SessionState, Summary,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ModelSource, SessionConfig, SessionConfigBuilder};
    pub use consumption_core::analytics::{
        advisory, efficiency_score, summary, trend_delta, DEFAULT_MAX_REFERENCE,
    };
    pub use consumption_core::{fit, fit_reference, PredictionLog, SessionController};
    pub use consumption_spi::{
        Advisory, ConsumptionError, ConsumptionEstimator, EstimatorModel, InputBounds, Mode,
        Observation, PredictionRecord, PredictionStore, Reading, Result, SessionState, Summary,
    };
}
