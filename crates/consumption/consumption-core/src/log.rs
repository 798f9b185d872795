//! Session prediction log

use consumption_spi::{PredictionRecord, PredictionStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// In-memory, append-only prediction log.
///
/// Sequence numbers start at 1 and keep increasing across [`clear`], so a
/// record reference held elsewhere never collides with a newer record.
///
/// Deserializing checks that `next_sequence` is above every stored sequence
/// and that records are in strictly increasing sequence order.
///
/// [`clear`]: PredictionStore::clear
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LogParts")]
pub struct PredictionLog {
    /// Records in insertion order
    records: Vec<PredictionRecord>,
    /// Sequence number for the next append
    next_sequence: u64,
}

#[derive(Deserialize)]
struct LogParts {
    records: Vec<PredictionRecord>,
    next_sequence: u64,
}

impl TryFrom<LogParts> for PredictionLog {
    type Error = String;

    fn try_from(parts: LogParts) -> Result<Self, Self::Error> {
        if parts
            .records
            .windows(2)
            .any(|pair| pair[0].sequence >= pair[1].sequence)
        {
            return Err("records must be in increasing sequence order".to_string());
        }

        let last_sequence = parts.records.last().map_or(0, |r| r.sequence);
        if parts.next_sequence <= last_sequence || parts.next_sequence == u64::MAX {
            return Err(format!(
                "next_sequence {} must be above {} and below u64::MAX",
                parts.next_sequence, last_sequence
            ));
        }

        Ok(Self {
            records: parts.records,
            next_sequence: parts.next_sequence,
        })
    }
}

impl Default for PredictionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Records in insertion order
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    /// The most recently appended record
    pub fn latest(&self) -> Option<&PredictionRecord> {
        self.records.last()
    }

    /// Sequence number the next append will receive
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }
}

impl PredictionStore for PredictionLog {
    fn append(&mut self, temperature: f64, rainfall: f64, predicted: f64) -> PredictionRecord {
        let record = PredictionRecord {
            temperature,
            rainfall,
            predicted,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.records.push(record);
        debug!(sequence = record.sequence, predicted, "appended prediction");
        record
    }

    fn clear(&mut self) {
        debug!(dropped = self.records.len(), "cleared prediction log");
        self.records.clear();
    }

    fn snapshot(&self) -> Vec<PredictionRecord> {
        let mut sorted = self.records.clone();
        // partial_cmp keeps -0.0 and 0.0 equal; total_cmp only orders NaN
        sorted.sort_by(|a, b| {
            a.temperature
                .partial_cmp(&b.temperature)
                .unwrap_or_else(|| a.temperature.total_cmp(&b.temperature))
                .then(a.sequence.cmp(&b.sequence))
        });
        sorted
    }

    fn latest_two_by_sequence(&self) -> Option<(&PredictionRecord, &PredictionRecord)> {
        match self.records.as_slice() {
            [.., previous, latest] => Some((previous, latest)),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
