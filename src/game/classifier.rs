use serde::{Deserialize, Serialize};

use super::Symbol;

/// Clear-channel level below which nothing is in front of the sensor.
pub const DEFAULT_CLEAR_THRESHOLD: u16 = 100;

/// Clear-channel level of a card read under normal light. Thresholds above
/// this would never see a card.
pub const NOMINAL_CLEAR: u16 = 1000;

/// One raw sample from a tri-channel color sensor plus its clear channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawReading {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub clear: u16,
}

impl RawReading {
    pub fn new(r: u16, g: u16, b: u16, clear: u16) -> Self {
        RawReading { r, g, b, clear }
    }

    /// A clean, well-lit reading of a card of the given color.
    pub fn of(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Red => RawReading::new(800, 100, 100, NOMINAL_CLEAR),
            Symbol::Blue => RawReading::new(100, 200, 700, NOMINAL_CLEAR),
            Symbol::Green => RawReading::new(100, 700, 200, NOMINAL_CLEAR),
        }
    }
}

/// Turns raw sensor samples into colors.
///
/// The channel comparisons are fixed; only the presence threshold is tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolClassifier {
    clear_threshold: u16,
}

impl SymbolClassifier {
    pub fn new(clear_threshold: u16) -> Self {
        SymbolClassifier { clear_threshold }
    }

    pub fn clear_threshold(&self) -> u16 {
        self.clear_threshold
    }

    /// Classify a sample. Returns `None` when no card is present or no
    /// channel dominates.
    pub fn classify(&self, reading: &RawReading) -> Option<Symbol> {
        if reading.clear < self.clear_threshold {
            return None;
        }

        let (r, g, b) = (
            u32::from(reading.r),
            u32::from(reading.g),
            u32::from(reading.b),
        );

        if r > g + b {
            Some(Symbol::Red)
        } else if b > g && b > r {
            Some(Symbol::Blue)
        } else if g > r && g > b {
            Some(Symbol::Green)
        } else {
            None
        }
    }
}

impl Default for SymbolClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_THRESHOLD)
    }
}
