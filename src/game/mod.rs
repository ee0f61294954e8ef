//! Core game logic: color classification, target generation, guess collection,
//! scoring and the session state machine. Rendering and hardware access stay
//! behind the [`SensorSource`] and [`DisplaySink`] traits.

mod classifier;
mod collector;
mod io;
mod layout;
mod level;
mod scoring;
mod sequence;
mod session;
mod symbol;

#[cfg(test)]
pub(crate) mod testing;

pub use classifier::{RawReading, SymbolClassifier, DEFAULT_CLEAR_THRESHOLD, NOMINAL_CLEAR};
pub use collector::GuessCollector;
pub use io::{CancelToken, DisplaySink, ReadLimit, SensorSource};
pub use layout::{slot_layout, SlotLayout};
pub use level::{Level, LevelSelector};
pub use scoring::{score, Scorecard};
pub use sequence::{decode_draw, Sequence, SequenceGenerator, TargetSource};
pub use session::{GameOutcome, GameSession, SessionPhase};
pub use symbol::{Symbol, NUM_COLORS};
