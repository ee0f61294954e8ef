use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use color_code::config::AppConfig;
use color_code::game::Level;
use color_code::logging;
use color_code::sim::{simulate, SimulationOptions, SimulationSummary};

/// Play many games headlessly with a random, feedback-aware player.
#[derive(Parser)]
#[command(name = "simulate", about = "Simulate color_code games to calibrate difficulty")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "color_code.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override level (1-3)
    #[arg(long)]
    level: Option<u8>,

    /// Seed generator and player for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_stderr_logging();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        config.simulation.games = games;
    }
    if let Some(level) = cli.level {
        config.simulation.level = level;
    }
    if cli.seed.is_some() {
        config.generator.seed = cli.seed;
    }
    config.validate().context("invalid configuration")?;

    let level = Level::try_from(config.simulation.level)?;
    let options = SimulationOptions {
        level,
        games: config.simulation.games,
        seed: config.generator.seed,
        classifier: config.classifier.classifier(),
        read_limit: config.input.read_limit(),
    };

    tracing::info!(level = %level, games = options.games, "starting simulation");
    let summary = simulate(&options).context("simulation aborted")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &SimulationSummary) {
    println!("Level {}: {} games", summary.level, summary.games);
    println!(
        "  wins   {:>6}  ({:.1}%)",
        summary.wins,
        summary.win_rate * 100.0
    );
    println!("  losses {:>6}", summary.losses);
    for (i, count) in summary.wins_by_attempt.iter().enumerate() {
        println!("  won on attempt {}: {}", i + 1, count);
    }
    if summary.wins > 0 {
        println!("  average attempts to win: {:.2}", summary.avg_attempts_to_win);
    }
}
