//! # Color Code
//!
//! A single-player guessing game: a hidden sequence of colored cards is
//! generated and the player presents cards to a color sensor until the
//! sequence is reproduced or the attempts run out.
//!
//! ## Modules
//!
//! - [`game`]: Core logic: classifier, target generator, guess collector,
//!   scoring, levels and the session state machine
//! - [`sim`]: Headless simulated player and batch runner
//! - [`ui`]: Terminal host: keyboard sensor, ratatui display, menu loop
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types
//! - [`logging`]: `tracing` subscriber setup for the binaries

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod sim;
pub mod ui;
