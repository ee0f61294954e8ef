use super::Symbol;
use crate::error::ScoreError;

/// Result of comparing one guess with the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    /// Slots where guess and target agree.
    pub correct: usize,
    /// The guess with every wrong slot blanked.
    pub masked: Vec<Option<Symbol>>,
}

impl Scorecard {
    pub fn len(&self) -> usize {
        self.masked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masked.is_empty()
    }

    pub fn incorrect(&self) -> usize {
        self.len() - self.correct
    }

    /// Every slot matched.
    pub fn is_perfect(&self) -> bool {
        self.correct == self.len()
    }
}

/// Compare `guess` with `target` slot by slot. Only exact positions count;
/// a right color in the wrong slot earns nothing.
pub fn score(guess: &[Symbol], target: &[Symbol]) -> Result<Scorecard, ScoreError> {
    if guess.len() != target.len() {
        return Err(ScoreError::LengthMismatch {
            guess: guess.len(),
            target: target.len(),
        });
    }

    let masked: Vec<Option<Symbol>> = guess
        .iter()
        .zip(target)
        .map(|(g, t)| (g == t).then_some(*g))
        .collect();
    let correct = masked.iter().filter(|slot| slot.is_some()).count();

    Ok(Scorecard { correct, masked })
}
