use std::ops::Deref;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Symbol, NUM_COLORS};
use crate::error::SequenceError;

/// Base-3 digits a single `u64` draw covers (3^40 < 2^64 < 3^41).
const DIGITS_PER_DRAW: usize = 40;

/// An ordered run of colors in which no two neighbors are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence(Vec<Symbol>);

impl Sequence {
    /// Validate and wrap a list of symbols.
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, SequenceError> {
        if symbols.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some(index) = symbols.windows(2).position(|pair| pair[0] == pair[1]) {
            return Err(SequenceError::AdjacentRepeat { index: index + 1 });
        }
        Ok(Sequence(symbols))
    }

    /// Wrap symbols already known to satisfy the adjacency rule.
    pub(crate) fn from_checked(symbols: Vec<Symbol>) -> Self {
        debug_assert!(!symbols.is_empty());
        debug_assert!(symbols.windows(2).all(|pair| pair[0] != pair[1]));
        Sequence(symbols)
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Symbol> {
        self.0
    }
}

impl Deref for Sequence {
    type Target = [Symbol];

    fn deref(&self) -> &[Symbol] {
        &self.0
    }
}

impl TryFrom<Vec<Symbol>> for Sequence {
    type Error = SequenceError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        Sequence::new(symbols)
    }
}

/// Anything that can produce the hidden target for a session.
pub trait TargetSource {
    /// Produce a target of exactly `length` slots. A zero length is an error.
    fn generate(&mut self, length: usize) -> Result<Sequence, SequenceError>;
}

/// Random target generator.
///
/// Draws a uniform integer in `[0, 3^length)`, reads it as base-3 digits
/// (least significant digit in slot 0) and repairs adjacent repeats forward by
/// bumping the repeated color to the next one in the Red -> Blue -> Green
/// cycle. The repair makes the result *not* uniform over valid sequences:
/// a bumped slot always lands on `prev.next()`, so that color is favored.
pub struct SequenceGenerator {
    rng: StdRng,
}

impl SequenceGenerator {
    /// Seed from OS entropy.
    pub fn new() -> Self {
        SequenceGenerator {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic generator for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        SequenceGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// Generate a target of exactly `length` slots.
    pub fn generate(&mut self, length: usize) -> Result<Sequence, SequenceError> {
        if length == 0 {
            return Err(SequenceError::Empty);
        }
        let mut symbols = Vec::with_capacity(length);
        let mut previous = None;

        let mut remaining = length;
        while remaining > 0 {
            let digits = remaining.min(DIGITS_PER_DRAW);
            let draw = self.rng.random_range(0..pow3(digits));
            previous = repair_into(&mut symbols, draw, digits, previous);
            remaining -= digits;
        }

        tracing::debug!(length, "generated target");
        Ok(Sequence::from_checked(symbols))
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetSource for SequenceGenerator {
    fn generate(&mut self, length: usize) -> Result<Sequence, SequenceError> {
        SequenceGenerator::generate(self, length)
    }
}

/// Decode one uniform draw into a sequence using the repair-forward rule.
///
/// `length` must be in `1..=40` so that `3^length` fits a `u64`; `draw` is
/// reduced modulo `3^length`.
pub fn decode_draw(draw: u64, length: usize) -> Result<Sequence, SequenceError> {
    if length == 0 {
        return Err(SequenceError::Empty);
    }
    if length > DIGITS_PER_DRAW {
        return Err(SequenceError::TooLong {
            length,
            max: DIGITS_PER_DRAW,
        });
    }
    let mut symbols = Vec::with_capacity(length);
    repair_into(&mut symbols, draw % pow3(length), length, None);
    Ok(Sequence::from_checked(symbols))
}

/// Append `digits` repaired symbols decoded from `draw`. Returns the last
/// emitted symbol.
fn repair_into(
    out: &mut Vec<Symbol>,
    mut draw: u64,
    digits: usize,
    mut previous: Option<Symbol>,
) -> Option<Symbol> {
    for _ in 0..digits {
        let digit = (draw % NUM_COLORS as u64) as u8;
        draw /= NUM_COLORS as u64;

        let mut symbol = Symbol::from_digit(digit).unwrap_or(Symbol::Red);
        if previous == Some(symbol) {
            symbol = symbol.next();
        }
        out.push(symbol);
        previous = Some(symbol);
    }
    previous
}

fn pow3(digits: usize) -> u64 {
    (NUM_COLORS as u64).pow(digits as u32)
}
