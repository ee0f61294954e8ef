use serde::{Deserialize, Serialize};

/// Number of guessable colors.
pub const NUM_COLORS: usize = 3;

/// A colored card. "No card" is expressed as `Option<Symbol>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Red,
    Blue,
    Green,
}

impl Symbol {
    /// All colors in enumeration order (color-1, color-2, color-3).
    pub const ALL: [Symbol; NUM_COLORS] = [Symbol::Red, Symbol::Blue, Symbol::Green];

    /// Map a base-3 digit to its color: 0 -> Red, 1 -> Blue, 2 -> Green.
    pub fn from_digit(digit: u8) -> Option<Symbol> {
        Self::ALL.get(usize::from(digit)).copied()
    }

    /// Next color in the fixed cycle Red -> Blue -> Green -> Red.
    pub fn next(self) -> Symbol {
        match self {
            Symbol::Red => Symbol::Blue,
            Symbol::Blue => Symbol::Green,
            Symbol::Green => Symbol::Red,
        }
    }

    /// Get color name for display
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Red => "Red",
            Symbol::Blue => "Blue",
            Symbol::Green => "Green",
        }
    }
}
