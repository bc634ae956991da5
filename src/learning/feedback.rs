// src/learning/feedback.rs — Feedback validation and score propagation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infra::errors::LessonsmithError;
use crate::learning::events::{Event, Notifier};
use crate::storage::store::Store;

pub const WEIGHT_SUCCESS: f64 = 0.4;
pub const WEIGHT_ENGAGEMENT: f64 = 0.3;
pub const WEIGHT_COMPREHENSION: f64 = 0.2;
pub const WEIGHT_TIMING: f64 = 0.1;

/// Raw feedback as submitted; every dimension is optional until validated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeedbackInput {
    pub success: Option<f64>,
    pub engagement: Option<f64>,
    pub comprehension: Option<f64>,
    pub timing: Option<f64>,
}

impl FeedbackInput {
    /// Validate all four dimensions: present, numeric, within [0, 5].
    pub fn validate(self) -> Result<FeedbackScores, LessonsmithError> {
        Ok(FeedbackScores {
            success: check_rating("success", self.success)?,
            engagement: check_rating("engagement", self.engagement)?,
            comprehension: check_rating("comprehension", self.comprehension)?,
            timing: check_rating("timing", self.timing)?,
        })
    }
}

fn check_rating(name: &str, value: Option<f64>) -> Result<f64, LessonsmithError> {
    let v = value
        .ok_or_else(|| LessonsmithError::Validation(format!("missing rating '{name}'")))?;
    if !v.is_finite() {
        return Err(LessonsmithError::Validation(format!(
            "rating '{name}' is not a number"
        )));
    }
    if !(0.0..=5.0).contains(&v) {
        return Err(LessonsmithError::Validation(format!(
            "rating '{name}' must be between 0 and 5, got {v}"
        )));
    }
    Ok(v)
}

/// Validated feedback for one lesson run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeedbackScores {
    pub success: f64,
    pub engagement: f64,
    pub comprehension: f64,
    pub timing: f64,
}

impl FeedbackScores {
    /// Weighted scalar summarizing this submission; stays within [0, 5]
    /// because the weights sum to 1 and every dimension is within [0, 5].
    pub fn success_score(&self) -> f64 {
        self.success * WEIGHT_SUCCESS
            + self.engagement * WEIGHT_ENGAGEMENT
            + self.comprehension * WEIGHT_COMPREHENSION
            + self.timing * WEIGHT_TIMING
    }
}

/// Result of one accepted feedback submission.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeedbackOutcome {
    pub success_score: f64,
    /// Submissions recorded for the lesson so far, this one included.
    pub feedback_total: i64,
    /// Patterns whose running average absorbed this score.
    pub patterns_updated: usize,
}

/// Validates feedback, persists it, and propagates the success score to
/// every pattern associated with the lesson.
pub struct FeedbackProcessor<'a> {
    store: &'a Store,
    notifier: &'a Notifier,
}

impl<'a> FeedbackProcessor<'a> {
    pub fn new(store: &'a Store, notifier: &'a Notifier) -> Self {
        Self { store, notifier }
    }

    /// Record one feedback submission.
    ///
    /// Validation failures happen before any write, so a rejected submission
    /// has no side effects. Content relationships share the patterns table
    /// under their own kind namespace, so one fold loop covers them too.
    /// Notification is fire-and-forget and cannot fail the submit.
    pub fn submit(
        &self,
        lesson_id: &str,
        input: FeedbackInput,
    ) -> Result<FeedbackOutcome, LessonsmithError> {
        let scores = input.validate()?;

        if self.store.get_lesson(lesson_id)?.is_none() {
            return Err(LessonsmithError::LessonNotFound {
                id: lesson_id.into(),
            });
        }

        let success_score = scores.success_score();
        let feedback_id = Uuid::new_v4().to_string();
        self.store.insert_feedback(
            &feedback_id,
            lesson_id,
            scores.success,
            scores.engagement,
            scores.comprehension,
            scores.timing,
            success_score,
        )?;

        let patterns = self.store.list_patterns_for_lesson(lesson_id)?;
        for pattern in &patterns {
            self.store.record_pattern_success(
                &pattern.pattern_type,
                &pattern.canonical_key,
                &pattern.payload,
                success_score,
            )?;
        }

        let feedback_total = self.store.count_feedback_for_lesson(lesson_id)?;

        tracing::info!(
            lesson_id,
            success_score,
            feedback_total,
            patterns = patterns.len(),
            "feedback recorded"
        );

        self.notifier.notify(Event::FeedbackCollected {
            lesson_id: lesson_id.into(),
            success_score,
        });

        Ok(FeedbackOutcome {
            success_score,
            feedback_total,
            patterns_updated: patterns.len(),
        })
    }
}
