//! Capabilities the game core consumes from its host: a color sensor to poll
//! and a display to draw on. Both are owned by the session and used only from
//! the game thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{GameOutcome, Level, RawReading, Scorecard, SlotLayout, Symbol};

/// Source of raw sensor samples. `sample` must not block for long; any
/// backoff between polls belongs to the implementation.
pub trait SensorSource {
    fn sample(&mut self) -> RawReading;
}

/// Fire-and-forget render commands issued by the session.
pub trait DisplaySink {
    /// Draw `count` empty slots using the given geometry.
    fn draw_slots(&mut self, count: usize, layout: SlotLayout);

    /// Show the accepted color at `slot` of the guess being entered.
    fn render_symbol(&mut self, slot: usize, symbol: Symbol);

    /// Show how many slots of the last guess were right.
    fn show_right_count(&mut self, correct: usize);

    /// Show the final result of the play-through.
    fn show_outcome(&mut self, outcome: GameOutcome);

    /// Show the last guess with wrong slots blanked.
    fn show_masked(&mut self, _scorecard: &Scorecard) {}

    /// Show which attempt (1-based) is about to be collected.
    fn show_attempt(&mut self, _attempt: usize, _total: usize) {}

    /// Show the rules for the chosen level.
    fn show_instructions(&mut self, _level: Level) {}
}

/// How long a read may wait for a qualifying sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadLimit {
    /// Poll until a qualifying sample arrives.
    #[default]
    Unbounded,
    /// Give up once this much time has passed since the read started.
    Within(Duration),
}

impl ReadLimit {
    /// `Within` for `Some`, `Unbounded` for `None`.
    pub fn from_millis(millis: Option<u64>) -> Self {
        match millis {
            Some(ms) => ReadLimit::Within(Duration::from_millis(ms)),
            None => ReadLimit::Unbounded,
        }
    }

    pub(crate) fn deadline_from(self, start: Instant) -> Option<Instant> {
        match self {
            ReadLimit::Unbounded => None,
            ReadLimit::Within(limit) => Some(start + limit),
        }
    }
}

/// Shared flag a host can raise to abort a pending read.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Lower the flag so the token can be reused for the next play-through.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
