// src/learning/engine.rs — Wiring of the learning components

use serde::Serialize;
use uuid::Uuid;

use crate::infra::config::Config;
use crate::infra::errors::LessonsmithError;
use crate::learning::events::{Event, Notifier};
use crate::learning::extractor::extract_sequence;
use crate::learning::feedback::{FeedbackInput, FeedbackOutcome, FeedbackProcessor};
use crate::learning::miner::{PatternMiner, ScoredPattern};
use crate::learning::ranker::{Suggestion, SuggestionRanker};
use crate::storage::store::{LessonRow, PatternRow, Store};

/// Outcome of analyzing one lesson.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub lesson_id: String,
    pub tokens: usize,
    pub candidates: usize,
    pub accepted: Vec<ScoredPattern>,
}

/// Owns the store and collaborators; every operation is a pure function of
/// its inputs plus reads/writes against the store.
pub struct LearningEngine {
    store: Store,
    config: Config,
    notifier: Notifier,
}

impl LearningEngine {
    pub fn new(store: Store, config: Config, notifier: Notifier) -> Self {
        Self {
            store,
            config,
            notifier,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn create_lesson(
        &self,
        title: &str,
        content: &str,
    ) -> Result<String, LessonsmithError> {
        let id = Uuid::new_v4().to_string();
        self.store.insert_lesson(&id, title, content)?;
        Ok(id)
    }

    pub fn get_lesson(&self, id: &str) -> Result<Option<LessonRow>, LessonsmithError> {
        Ok(self.store.get_lesson(id)?)
    }

    /// Replace a lesson's content. Patterns mined from the previous content
    /// keep their associations; re-analysis picks up the new sequence.
    pub fn update_lesson(&self, id: &str, content: &str) -> Result<(), LessonsmithError> {
        if !self.store.update_lesson_content(id, content)? {
            return Err(LessonsmithError::LessonNotFound { id: id.into() });
        }
        Ok(())
    }

    /// Extract the lesson's token sequence, register every candidate pattern
    /// against the lesson, and report the candidates whose history already
    /// clears the confidence floor.
    ///
    /// Associations are recorded for all candidates, not just accepted ones:
    /// a pattern can only build up a track record through feedback folds on
    /// lessons it is linked to.
    pub fn analyze_lesson(&self, lesson_id: &str) -> Result<AnalysisReport, LessonsmithError> {
        let lesson =
            self.store
                .get_lesson(lesson_id)?
                .ok_or_else(|| LessonsmithError::LessonNotFound {
                    id: lesson_id.into(),
                })?;

        let sequence = extract_sequence(&lesson.content);
        let miner = PatternMiner::new(&self.store, &self.config.mining);

        let candidates = miner.scan(&sequence);
        for pattern in &candidates {
            self.store.associate_pattern(
                lesson_id,
                pattern.kind.as_str(),
                &pattern.canonical_key(),
                &pattern.canonical_key(),
            )?;
        }

        let accepted = miner.accept(candidates.clone())?;

        tracing::info!(
            lesson_id,
            tokens = sequence.len(),
            candidates = candidates.len(),
            accepted = accepted.len(),
            "lesson analyzed"
        );

        self.notifier.notify(Event::PatternsDetected {
            lesson_id: lesson_id.into(),
            candidates: candidates.len(),
            accepted: accepted.len(),
        });

        Ok(AnalysisReport {
            lesson_id: lesson_id.into(),
            tokens: sequence.len(),
            candidates: candidates.len(),
            accepted,
        })
    }

    pub fn submit_feedback(
        &self,
        lesson_id: &str,
        input: FeedbackInput,
    ) -> Result<FeedbackOutcome, LessonsmithError> {
        FeedbackProcessor::new(&self.store, &self.notifier).submit(lesson_id, input)
    }

    pub fn suggest(&self, content: &str) -> Result<Vec<Suggestion>, LessonsmithError> {
        Ok(SuggestionRanker::new(&self.store, &self.config).suggest(content)?)
    }

    pub fn list_patterns(&self) -> Result<Vec<PatternRow>, LessonsmithError> {
        Ok(self.store.query_detected_patterns()?)
    }
}
