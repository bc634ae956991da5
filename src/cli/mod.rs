// src/cli/mod.rs — CLI definition (clap derive)

pub mod analyze;
pub mod feedback;
pub mod patterns;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::infra::config::Config;
use crate::infra::paths;
use crate::learning::engine::LearningEngine;
use crate::learning::events::Notifier;
use crate::storage::StorageManager;

#[derive(Parser)]
#[command(
    name = "lessonsmith",
    about = "Teaching-pattern learning engine for lesson planning",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server for the lesson editor
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Mine a stored lesson for teaching patterns
    Analyze {
        /// Lesson ID to analyze
        lesson_id: String,
    },
    /// List stored patterns, best first
    Patterns {
        /// Only show patterns with at least this many observations
        #[arg(long, default_value = "0")]
        min_count: i64,
    },
    /// Submit feedback for a lesson (all ratings 0-5)
    Feedback {
        /// Lesson ID the feedback belongs to
        lesson_id: String,
        #[arg(long)]
        success: f64,
        #[arg(long)]
        engagement: f64,
        #[arg(long)]
        comprehension: f64,
        #[arg(long)]
        timing: f64,
    },
}

/// Resolve the database path from config or the platform default.
pub fn resolve_db_path(config: &Config) -> PathBuf {
    config
        .storage
        .db_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(paths::db_path)
}

/// Open the store and assemble an engine for one-shot commands.
pub fn open_engine(config: &Config) -> anyhow::Result<LearningEngine> {
    paths::ensure_dirs()?;

    let db_path = resolve_db_path(config);
    // A configured db_path may live outside the standard data dir
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let manager = StorageManager::open(&db_path)?;
    Ok(LearningEngine::new(
        manager.store,
        config.clone(),
        Notifier::default(),
    ))
}
