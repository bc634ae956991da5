// src/learning/scorer.rs — Confidence scoring from historical usage

use crate::learning::pattern::Pattern;
use crate::storage::store::Store;

/// Scores candidate patterns against their recorded history.
pub struct ConfidenceScorer<'a> {
    store: &'a Store,
    min_occurrences: u32,
}

impl<'a> ConfidenceScorer<'a> {
    pub fn new(store: &'a Store, min_occurrences: u32) -> Self {
        Self {
            store,
            min_occurrences,
        }
    }

    /// Confidence of a candidate: the pattern's historical average success,
    /// or 0.0 when fewer than `min_occurrences` observations exist. A pattern
    /// with too few samples is statistically insufficient no matter how good
    /// its average looks. Unknown patterns score 0.0, never an error.
    pub fn confidence(&self, pattern: &Pattern) -> anyhow::Result<f64> {
        let key = pattern.canonical_key();
        let stats = self.store.get_pattern_stats(pattern.kind.as_str(), &key)?;

        match stats {
            Some(s) if s.usage_count >= self.min_occurrences as i64 => Ok(s.avg_success),
            _ => Ok(0.0),
        }
    }
}
