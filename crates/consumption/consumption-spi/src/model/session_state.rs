//! Session state machine and prediction mode

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the session log currently holds any predictions.
///
/// Transitions: `NoPredictions` at session start, `HasPredictions` after any
/// successful predict, back to `NoPredictions` on clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    #[default]
    NoPredictions,
    HasPredictions,
}

impl SessionState {
    /// Introductory content is only shown before the first prediction.
    pub fn shows_intro(self) -> bool {
        matches!(self, SessionState::NoPredictions)
    }
}

/// How predictions are triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One explicit trigger produces one prediction
    #[default]
    Manual,
    /// Every change of the input reading produces a prediction (premium only)
    Automatic,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Manual => "manual",
            Mode::Automatic => "automatic",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
