use std::fmt;

use super::collector::{poll_symbol, PollRequest};
use super::{CancelToken, ReadLimit, SensorSource, Symbol, SymbolClassifier};
use crate::error::{LevelError, ReadError};

/// Difficulty. Slot count and attempt budget both grow with the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Length of the hidden sequence.
    pub fn num_slots(self) -> usize {
        usize::from(self.number()) + 2
    }

    /// Guesses allowed before the game is lost. Same formula as `num_slots`.
    pub fn num_attempts(self) -> usize {
        usize::from(self.number()) + 2
    }

    /// Map the card shown at the level prompt to a level. The mapping follows
    /// the on-screen legend, not color order: Blue is Easy, Green is Medium,
    /// Red is Hard.
    pub fn from_symbol(symbol: Symbol) -> Level {
        match symbol {
            Symbol::Blue => Level::Easy,
            Symbol::Green => Level::Medium,
            Symbol::Red => Level::Hard,
        }
    }

    /// Like [`Level::from_symbol`], rejecting an empty read instead of
    /// defaulting.
    pub fn select(symbol: Option<Symbol>) -> Result<Level, LevelError> {
        symbol.map(Level::from_symbol).ok_or(LevelError::NoSymbol)
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::Easy),
            2 => Ok(Level::Medium),
            3 => Ok(Level::Hard),
            other => Err(LevelError::InvalidLevel(other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.number())
    }
}

/// Reads the level prompt from the sensor.
#[derive(Debug, Clone, Default)]
pub struct LevelSelector {
    classifier: SymbolClassifier,
    limit: ReadLimit,
    cancel: Option<CancelToken>,
}

impl LevelSelector {
    pub fn new(classifier: SymbolClassifier, limit: ReadLimit) -> Self {
        LevelSelector {
            classifier,
            limit,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Poll until a card is shown and map it to a level.
    pub fn await_level<S: SensorSource + ?Sized>(&self, sensor: &mut S) -> Result<Level, ReadError> {
        let symbol = poll_symbol(
            sensor,
            PollRequest {
                classifier: &self.classifier,
                limit: self.limit,
                cancel: self.cancel.as_ref(),
                previous: None,
                slot: 0,
            },
        )?;
        let level = Level::from_symbol(symbol);
        tracing::info!(card = symbol.name(), level = %level, "level chosen");
        Ok(level)
    }
}
