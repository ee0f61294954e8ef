use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use color_code::config::AppConfig;
use color_code::game::Level;
use color_code::logging;
use color_code::ui::App;

/// Guess the hidden sequence of colored cards.
#[derive(Parser)]
#[command(name = "color_code", about = "Guess the hidden sequence of colored cards")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "color_code.toml")]
    config: PathBuf,

    /// Seed the target generator for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the level prompt and always play this level (1-3)
    #[arg(long)]
    level: Option<u8>,

    /// Give up on a slot after this many milliseconds without a new card
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Where to write logs
    #[arg(long, default_value = "color_code.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = logging::init_file_logging(&cli.log_file) {
        // Still on the normal screen, so this is visible.
        eprintln!(
            "warning: cannot open log file {}: {err}; logging disabled",
            cli.log_file.display()
        );
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.seed.is_some() {
        config.generator.seed = cli.seed;
    }
    if cli.timeout_ms.is_some() {
        config.input.read_timeout_ms = cli.timeout_ms;
    }
    config.validate().context("invalid configuration")?;

    let fixed_level = cli
        .level
        .map(Level::try_from)
        .transpose()
        .context("invalid --level")?;

    run(&config, fixed_level).context("terminal error")
}

fn run(config: &AppConfig, fixed_level: Option<Level>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(terminal, config, fixed_level);
    let res = app.run();

    // Restore terminal, also on error
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);

    res
}
