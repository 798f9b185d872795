//! Model module containing data structures

mod advisory;
mod estimator_model;
mod input_bounds;
mod observation;
mod prediction_record;
mod reading;
mod session_state;
mod summary;

pub use advisory::Advisory;
pub use estimator_model::EstimatorModel;
pub use input_bounds::InputBounds;
pub use observation::Observation;
pub use prediction_record::PredictionRecord;
pub use reading::Reading;
pub use session_state::{Mode, SessionState};
pub use summary::Summary;
