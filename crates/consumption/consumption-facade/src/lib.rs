//! Consumption Facade
//!
//! High-level API for water consumption sessions. Re-exports all public types
//! from the consumption stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use consumption_api::*;

// Explicit re-exports for documentation
pub use consumption_api::prelude;

// Analytics functions at root
pub use consumption_core::analytics::{
    advisory, efficiency_score, summary, trend_delta, DEFAULT_MAX_REFERENCE,
    HIGH_TEMPERATURE_THRESHOLD, LOW_RAINFALL_THRESHOLD,
};
pub use consumption_core::export::{to_csv, CSV_HEADERS};

// Re-export SPI contracts
pub use consumption_spi::{ConsumptionEstimator, PredictionStore};
