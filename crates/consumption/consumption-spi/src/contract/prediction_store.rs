//! Trait for the session's prediction log

use crate::model::PredictionRecord;

/// Append-only store of prediction records.
///
/// The only destructive operation is [`PredictionStore::clear`], which drops
/// every record at once. Sequence numbers handed out by `append` are unique
/// and strictly increasing for the lifetime of the store.
pub trait PredictionStore {
    /// Append a record, assigning it the next sequence number
    fn append(&mut self, temperature: f64, rainfall: f64, predicted: f64) -> PredictionRecord;

    /// Remove every record
    fn clear(&mut self);

    /// Records ordered by ascending temperature, ties by ascending sequence
    fn snapshot(&self) -> Vec<PredictionRecord>;

    /// The two most recently appended records as `(previous, latest)`
    fn latest_two_by_sequence(&self) -> Option<(&PredictionRecord, &PredictionRecord)>;

    /// Number of records currently held
    fn len(&self) -> usize;

    /// Whether the store holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
