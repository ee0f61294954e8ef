use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use super::player::{PlayerDisplay, PlayerSensor, RandomPlayer};
use crate::error::SessionError;
use crate::game::{GameOutcome, GameSession, GuessCollector, Level, ReadLimit, SequenceGenerator, SymbolClassifier};

/// What to simulate.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub level: Level,
    pub games: usize,
    /// Seeds both the target generator and the player when set.
    pub seed: Option<u64>,
    pub classifier: SymbolClassifier,
    pub read_limit: ReadLimit,
}

impl SimulationOptions {
    pub fn new(level: Level, games: usize) -> Self {
        SimulationOptions {
            level,
            games,
            seed: None,
            classifier: SymbolClassifier::default(),
            read_limit: ReadLimit::Unbounded,
        }
    }
}

/// Tally of a batch of simulated games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub level: u8,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f32,
    /// `wins_by_attempt[i]` counts games won on attempt `i + 1`.
    pub wins_by_attempt: Vec<usize>,
    pub avg_attempts_to_win: f32,
}

impl SimulationSummary {
    fn new(level: Level, games: usize) -> Self {
        SimulationSummary {
            level: level.number(),
            games,
            wins: 0,
            losses: 0,
            win_rate: 0.0,
            wins_by_attempt: vec![0; level.num_attempts()],
            avg_attempts_to_win: 0.0,
        }
    }

    fn record(&mut self, outcome: GameOutcome, attempts_used: usize) {
        match outcome {
            GameOutcome::Win => {
                self.wins += 1;
                if let Some(count) = self.wins_by_attempt.get_mut(attempts_used.saturating_sub(1)) {
                    *count += 1;
                }
            }
            GameOutcome::Lose => self.losses += 1,
        }
    }

    fn finalize(&mut self) {
        let played = self.wins + self.losses;
        if played > 0 {
            self.win_rate = self.wins as f32 / played as f32;
        }
        if self.wins > 0 {
            let total: usize = self
                .wins_by_attempt
                .iter()
                .enumerate()
                .map(|(i, count)| (i + 1) * count)
                .sum();
            self.avg_attempts_to_win = total as f32 / self.wins as f32;
        }
    }
}

/// Play `options.games` sessions with a [`RandomPlayer`].
pub fn simulate(options: &SimulationOptions) -> Result<SimulationSummary, SessionError> {
    let player = match options.seed {
        // Offset so the player does not mirror the generator's stream.
        Some(seed) => RandomPlayer::with_seed(seed.wrapping_add(1)),
        None => RandomPlayer::new(),
    };
    let player = Rc::new(RefCell::new(player));

    let mut session = GameSession::with_parts(
        PlayerSensor(Rc::clone(&player)),
        PlayerDisplay(Rc::clone(&player)),
        SequenceGenerator::from_config(options.seed),
        GuessCollector::new(options.classifier, options.read_limit),
    );

    let mut summary = SimulationSummary::new(options.level, options.games);
    for game in 0..options.games {
        let outcome = session.run_level(options.level)?;
        summary.record(outcome, session.history().len());
        if (game + 1) % 1_000 == 0 {
            tracing::info!(games = game + 1, wins = summary.wins, "simulation progress");
        }
    }
    summary.finalize();

    Ok(summary)
}
