//! Consumption Service Provider Interface
//!
//! Defines the contracts, data models and error type shared by every layer of
//! the water consumption estimator:
//!
//! - [`ConsumptionEstimator`]: maps a (temperature, rainfall) reading to a
//!   predicted consumption value
//! - [`PredictionStore`]: append-only log of frozen prediction records
//! - [`ConsumptionError`]: standardized error type for all operations
//! - [`Result`]: convenient result type alias

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ConsumptionEstimator, PredictionStore};
pub use error::{ConsumptionError, Result};
pub use model::{
    Advisory, EstimatorModel, InputBounds, Mode, Observation, PredictionRecord, Reading,
    SessionState, Summary,
};
