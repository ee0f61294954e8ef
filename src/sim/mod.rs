//! Headless play: a simulated player feeding the sensor from its own guesses,
//! and a runner that plays many sessions and tallies the results.

mod player;
mod runner;

pub use player::{PlayerDisplay, PlayerSensor, RandomPlayer};
pub use runner::{simulate, SimulationOptions, SimulationSummary};
