//! Prediction record model

use serde::{Deserialize, Serialize};

/// A frozen snapshot of one predict operation.
///
/// `predicted` is stored as computed at insertion time and is never
/// recomputed. `sequence` is the only reliable source of chronological order
/// once records are re-sorted for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Temperature in °C
    pub temperature: f64,
    /// Rainfall in mm
    pub rainfall: f64,
    /// Predicted water consumption in liters
    pub predicted: f64,
    /// Insertion order counter assigned by the log
    pub sequence: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_all_fields() {
        let record = PredictionRecord {
            temperature: 30.0,
            rainfall: 100.0,
            predicted: 160.0,
            sequence: 3,
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["temperature"], 30.0);
        assert_eq!(json["rainfall"], 100.0);
        assert_eq!(json["predicted"], 160.0);
        assert_eq!(json["sequence"], 3);
    }
}
