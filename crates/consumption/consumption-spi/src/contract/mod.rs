//! Contract module containing trait definitions for estimation and logging

mod consumption_estimator;
mod prediction_store;

pub use consumption_estimator::ConsumptionEstimator;
pub use prediction_store::PredictionStore;
