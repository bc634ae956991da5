// src/learning/ranker.rs — Merging and ranking of editor suggestions

use serde::Serialize;

use crate::infra::config::Config;
use crate::learning::extractor::{extract_sequence, TokenKind};
use crate::storage::store::Store;

/// What a suggestion points the author at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// A teaching method that historically follows the current one.
    NextMethod,
    /// A content block that historically follows the current one.
    RelatedContent,
}

/// One ranked suggestion for the editor.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub reference: String,
    pub kind: SuggestionKind,
    pub confidence: f64,
}

/// Sort descending by confidence and cut to the top `limit`.
///
/// The sort must be stable: confidence is the only comparison key, so
/// equal-confidence candidates keep their merge order.
pub fn rank(mut candidates: Vec<Suggestion>, limit: usize) -> Vec<Suggestion> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    candidates.truncate(limit);
    candidates
}

/// Builds suggestion candidates from the in-progress editing buffer and the
/// pattern history, then ranks them.
pub struct SuggestionRanker<'a> {
    store: &'a Store,
    min_occurrences: u32,
    max_suggestions: usize,
    fetch_limit: u32,
}

impl<'a> SuggestionRanker<'a> {
    pub fn new(store: &'a Store, config: &Config) -> Self {
        Self {
            store,
            min_occurrences: config.mining.min_occurrences,
            max_suggestions: config.ranking.max_suggestions,
            fetch_limit: config.ranking.fetch_limit,
        }
    }

    /// Suggestions for the current editing context.
    ///
    /// Pattern candidates lead off the trailing method token; content
    /// candidates lead off the trailing content token. Both sources are
    /// merged pattern-first, then ranked. No matches is an empty list,
    /// not an error.
    pub fn suggest(&self, content: &str) -> anyhow::Result<Vec<Suggestion>> {
        let sequence = extract_sequence(content);
        let mut candidates = Vec::new();

        if let Some(method) = sequence.iter().rev().find(|t| t.kind == TokenKind::Method) {
            let rows = self.store.query_method_patterns_leading(
                &method.id,
                self.min_occurrences,
                self.fetch_limit,
            )?;
            for row in rows {
                if let Some(next) = row.payload_field("second_method") {
                    candidates.push(Suggestion {
                        reference: next,
                        kind: SuggestionKind::NextMethod,
                        confidence: row.avg_success,
                    });
                }
            }
        }

        if let Some(block) = sequence.iter().rev().find(|t| t.kind == TokenKind::Content) {
            let rows = self.store.query_content_patterns_leading(
                &block.id,
                self.min_occurrences,
                self.fetch_limit,
            )?;
            for row in rows {
                if let Some(next) = row.payload_field("second_content") {
                    candidates.push(Suggestion {
                        reference: next,
                        kind: SuggestionKind::RelatedContent,
                        confidence: row.avg_success,
                    });
                }
            }
        }

        Ok(rank(candidates, self.max_suggestions))
    }
}
