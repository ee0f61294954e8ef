//! Scripted fakes for the sensor and display capabilities.

use super::{CancelToken, DisplaySink, GameOutcome, Level, RawReading, Scorecard, SensorSource, SlotLayout, Symbol};

/// A clear, unambiguous reading for `symbol`.
pub fn reading_for(symbol: Symbol) -> RawReading {
    RawReading::of(symbol)
}

/// Plays back a fixed list of readings, then repeats the last one forever.
pub struct ScriptedSensor {
    readings: Vec<RawReading>,
    cursor: usize,
    cancel_after: Option<(usize, CancelToken)>,
}

impl ScriptedSensor {
    pub fn new(readings: Vec<RawReading>) -> Self {
        ScriptedSensor {
            readings,
            cursor: 0,
            cancel_after: None,
        }
    }

    /// Build a script presenting each symbol once, with a dark reading
    /// between them.
    pub fn presenting(symbols: &[Symbol]) -> Self {
        let mut readings = Vec::with_capacity(symbols.len() * 2);
        for &symbol in symbols {
            readings.push(reading_for(symbol));
            readings.push(RawReading::default());
        }
        Self::new(readings)
    }

    /// Raise `token` once `samples` readings have been taken.
    pub fn cancel_after(mut self, samples: usize, token: CancelToken) -> Self {
        self.cancel_after = Some((samples, token));
        self
    }

    pub fn samples_taken(&self) -> usize {
        self.cursor
    }
}

impl SensorSource for ScriptedSensor {
    fn sample(&mut self) -> RawReading {
        let reading = self
            .readings
            .get(self.cursor)
            .or(self.readings.last())
            .copied()
            .unwrap_or_default();
        self.cursor += 1;

        if let Some((samples, token)) = &self.cancel_after {
            if self.cursor >= *samples {
                token.cancel();
            }
        }
        reading
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Slots(usize, SlotLayout),
    Symbol(usize, Symbol),
    RightCount(usize),
    Masked(Vec<Option<Symbol>>),
    Attempt(usize, usize),
    Instructions(Level),
    Outcome(GameOutcome),
}

/// Records every command it receives.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub events: Vec<DisplayEvent>,
}

impl RecordingDisplay {
    pub fn attempts_shown(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DisplayEvent::Attempt(..)))
            .count()
    }
}

impl DisplaySink for RecordingDisplay {
    fn draw_slots(&mut self, count: usize, layout: SlotLayout) {
        self.events.push(DisplayEvent::Slots(count, layout));
    }

    fn render_symbol(&mut self, slot: usize, symbol: Symbol) {
        self.events.push(DisplayEvent::Symbol(slot, symbol));
    }

    fn show_right_count(&mut self, correct: usize) {
        self.events.push(DisplayEvent::RightCount(correct));
    }

    fn show_outcome(&mut self, outcome: GameOutcome) {
        self.events.push(DisplayEvent::Outcome(outcome));
    }

    fn show_masked(&mut self, scorecard: &Scorecard) {
        self.events.push(DisplayEvent::Masked(scorecard.masked.clone()));
    }

    fn show_attempt(&mut self, attempt: usize, total: usize) {
        self.events.push(DisplayEvent::Attempt(attempt, total));
    }

    fn show_instructions(&mut self, level: Level) {
        self.events.push(DisplayEvent::Instructions(level));
    }
}

/// Always hands out the same target.
pub struct FixedTarget(pub Vec<Symbol>);

impl super::TargetSource for FixedTarget {
    fn generate(&mut self, _length: usize) -> Result<super::Sequence, crate::error::SequenceError> {
        super::Sequence::new(self.0.clone())
    }
}
