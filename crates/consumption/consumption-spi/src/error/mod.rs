//! Error types for consumption estimation
//!
//! This module provides the [`ConsumptionError`] enum and [`Result`] type alias
//! used across the estimator, the prediction log and the session controller.

mod consumption_error;

pub use consumption_error::{ConsumptionError, Result};
