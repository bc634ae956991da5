// src/learning/miner.rs — Pattern detection from token sequences

use serde::Serialize;

use crate::infra::config::MiningConfig;
use crate::learning::extractor::{Token, TokenKind};
use crate::learning::pattern::{Pattern, PatternKind};
use crate::learning::scorer::ConfidenceScorer;
use crate::storage::store::Store;

/// A scan strategy for one pattern kind. Rules are pure over the token
/// sequence; confidence filtering happens afterwards in the miner.
pub trait PatternRule: Send + Sync {
    fn kind(&self) -> PatternKind;
    fn scan(&self, sequence: &[Token]) -> Vec<Pattern>;
}

/// Adjacent method pairs: window of 2, both tokens must be methods.
/// The candidate carries both method ids plus the first token's context.
pub struct MethodCombinationRule;

impl PatternRule for MethodCombinationRule {
    fn kind(&self) -> PatternKind {
        PatternKind::MethodCombination
    }

    fn scan(&self, sequence: &[Token]) -> Vec<Pattern> {
        sequence
            .windows(2)
            .filter(|w| w[0].kind == TokenKind::Method && w[1].kind == TokenKind::Method)
            .map(|w| Pattern::method_combination(&w[0].id, &w[1].id, &w[0].context))
            .collect()
    }
}

/// Adjacent content pairs, same window shape as method combinations.
pub struct ContentRelationshipRule;

impl PatternRule for ContentRelationshipRule {
    fn kind(&self) -> PatternKind {
        PatternKind::ContentRelationship
    }

    fn scan(&self, sequence: &[Token]) -> Vec<Pattern> {
        sequence
            .windows(2)
            .filter(|w| w[0].kind == TokenKind::Content && w[1].kind == TokenKind::Content)
            .map(|w| Pattern::content_relationship(&w[0].id, &w[1].id, &w[0].context))
            .collect()
    }
}

/// Ties each method to the lesson phase it appears in, by sequence position.
pub struct TimingRule;

impl PatternRule for TimingRule {
    fn kind(&self) -> PatternKind {
        PatternKind::Timing
    }

    fn scan(&self, sequence: &[Token]) -> Vec<Pattern> {
        let len = sequence.len();
        sequence
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Method)
            .map(|(i, t)| Pattern::timing(&t.id, phase_of(i, len)))
            .collect()
    }
}

/// Lesson phase by position third.
fn phase_of(index: usize, len: usize) -> &'static str {
    match (index * 3) / len.max(1) {
        0 => "opening",
        1 => "core",
        _ => "closing",
    }
}

pub fn default_rules() -> Vec<Box<dyn PatternRule>> {
    vec![
        Box::new(MethodCombinationRule),
        Box::new(ContentRelationshipRule),
        Box::new(TimingRule),
    ]
}

/// A candidate that passed the confidence floor.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPattern {
    pub pattern: Pattern,
    pub confidence: f64,
}

/// Scans token sequences for candidate patterns and filters them by
/// historical confidence.
pub struct PatternMiner<'a> {
    scorer: ConfidenceScorer<'a>,
    rules: Vec<Box<dyn PatternRule>>,
    min_confidence: f64,
}

impl<'a> PatternMiner<'a> {
    pub fn new(store: &'a Store, config: &MiningConfig) -> Self {
        Self::with_rules(store, config, default_rules())
    }

    pub fn with_rules(
        store: &'a Store,
        config: &MiningConfig,
        rules: Vec<Box<dyn PatternRule>>,
    ) -> Self {
        Self {
            scorer: ConfidenceScorer::new(store, config.min_occurrences),
            rules,
            min_confidence: config.min_confidence,
        }
    }

    /// All candidates from all rules, in rule order then sequence order.
    /// No store access and no filtering.
    pub fn scan(&self, sequence: &[Token]) -> Vec<Pattern> {
        self.rules
            .iter()
            .flat_map(|rule| rule.scan(sequence))
            .collect()
    }

    /// Score candidates and keep the ones meeting the confidence floor.
    pub fn accept(&self, candidates: Vec<Pattern>) -> anyhow::Result<Vec<ScoredPattern>> {
        let mut accepted = Vec::new();
        for pattern in candidates {
            let confidence = self.scorer.confidence(&pattern)?;
            if confidence >= self.min_confidence {
                accepted.push(ScoredPattern {
                    pattern,
                    confidence,
                });
            }
        }
        Ok(accepted)
    }

    /// Scan and filter in one pass.
    pub fn mine(&self, sequence: &[Token]) -> anyhow::Result<Vec<ScoredPattern>> {
        self.accept(self.scan(sequence))
    }
}
