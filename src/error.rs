use std::path::PathBuf;

/// Errors raised when building a [`Sequence`](crate::game::Sequence) from raw symbols.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("sequence must contain at least one symbol")]
    Empty,

    #[error("symbol at slot {index} repeats the previous slot")]
    AdjacentRepeat { index: usize },

    #[error("a single draw covers at most {max} slots (got {length})")]
    TooLong { length: usize, max: usize },
}

/// Errors raised when comparing a guess against the target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("guess has {guess} slots but target has {target}")]
    LengthMismatch { guess: usize, target: usize },
}

/// Errors raised when choosing a difficulty level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("level must be 1, 2 or 3 (got {0})")]
    InvalidLevel(u8),

    #[error("no card was detected, cannot choose a level")]
    NoSymbol,
}

/// Errors raised while waiting on the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("timed out waiting for a card at slot {slot}")]
    Timeout { slot: usize },

    #[error("read was cancelled")]
    Cancelled,
}

/// Errors that abort a play-through before it reaches an outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("sensor read failed: {0}")]
    Read(#[from] ReadError),

    #[error("scoring failed: {0}")]
    Score(#[from] ScoreError),

    #[error("invalid sequence: {0}")]
    Sequence(#[from] SequenceError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
