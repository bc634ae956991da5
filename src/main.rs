// src/main.rs — Lessonsmith entry point

use clap::Parser;

use lessonsmith::cli::{Cli, Commands};
use lessonsmith::infra::config::Config;
use lessonsmith::infra::logger;

#[tokio::main]
async fn main() {
    // Respects LESSONSMITH_LOG / RUST_LOG
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Commands::Serve { port } => lessonsmith::cli::serve::run_serve(&config, port).await,
        Commands::Analyze { lesson_id } => {
            lessonsmith::cli::analyze::run_analyze(&config, &lesson_id)
        }
        Commands::Patterns { min_count } => {
            lessonsmith::cli::patterns::run_patterns(&config, min_count)
        }
        Commands::Feedback {
            lesson_id,
            success,
            engagement,
            comprehension,
            timing,
        } => lessonsmith::cli::feedback::run_feedback(
            &config,
            &lesson_id,
            success,
            engagement,
            comprehension,
            timing,
        ),
    }
}
