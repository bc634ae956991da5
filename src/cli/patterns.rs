// src/cli/patterns.rs — Pattern listing

use crate::cli;
use crate::infra::config::Config;

pub fn run_patterns(config: &Config, min_count: i64) -> anyhow::Result<()> {
    let engine = cli::open_engine(config)?;
    let patterns = engine.list_patterns()?;

    let mut shown = 0;
    for row in &patterns {
        if row.usage_count < min_count {
            continue;
        }
        println!(
            "{:<22} avg {:.2}  n={:<4} {}",
            row.pattern_type, row.avg_success, row.usage_count, row.payload
        );
        shown += 1;
    }

    if shown == 0 {
        println!("No patterns recorded yet. Analyze lessons and collect feedback first.");
    }

    Ok(())
}
