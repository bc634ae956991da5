// src/cli/analyze.rs — One-shot lesson analysis

use crate::cli;
use crate::infra::config::Config;

pub fn run_analyze(config: &Config, lesson_id: &str) -> anyhow::Result<()> {
    let engine = cli::open_engine(config)?;
    let report = engine.analyze_lesson(lesson_id)?;

    println!(
        "Lesson {}: {} tokens, {} candidate patterns, {} accepted",
        report.lesson_id, report.tokens, report.candidates, report.accepted.len()
    );

    for scored in &report.accepted {
        println!(
            "  [{:.2}] {} {}",
            scored.confidence,
            scored.pattern.kind,
            scored.pattern.canonical_key()
        );
    }

    Ok(())
}
