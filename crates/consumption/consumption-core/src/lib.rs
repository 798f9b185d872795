//! Consumption Core
//!
//! Core implementations for the water consumption estimator: the reference
//! dataset, least-squares fitting, the session prediction log, log analytics,
//! CSV export and the session controller that ties them together.

pub mod analytics;
pub mod estimator;
pub mod export;
pub mod log;
pub mod reference;
pub mod session;

// Re-export SPI types for implementations
pub use consumption_spi::{
    Advisory, ConsumptionError, ConsumptionEstimator, EstimatorModel, InputBounds, Mode,
    Observation, PredictionRecord, PredictionStore, Reading, Result, SessionState, Summary,
};

// Re-export main types
pub use estimator::{fit, fit_reference};
pub use log::PredictionLog;
pub use reference::REFERENCE_OBSERVATIONS;
pub use session::SessionController;
