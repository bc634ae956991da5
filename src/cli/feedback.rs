// src/cli/feedback.rs — Feedback submission from the command line

use crate::cli;
use crate::infra::config::Config;
use crate::learning::feedback::FeedbackInput;

#[allow(clippy::too_many_arguments)]
pub fn run_feedback(
    config: &Config,
    lesson_id: &str,
    success: f64,
    engagement: f64,
    comprehension: f64,
    timing: f64,
) -> anyhow::Result<()> {
    let engine = cli::open_engine(config)?;

    let input = FeedbackInput {
        success: Some(success),
        engagement: Some(engagement),
        comprehension: Some(comprehension),
        timing: Some(timing),
    };

    let outcome = engine.submit_feedback(lesson_id, input)?;
    println!(
        "Feedback recorded for lesson {lesson_id} (success score {:.2}, {} submissions total, {} patterns updated)",
        outcome.success_score, outcome.feedback_total, outcome.patterns_updated
    );
    Ok(())
}
