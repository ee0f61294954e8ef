use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{DisplaySink, GameOutcome, Level, RawReading, Scorecard, SensorSource, SlotLayout, Symbol};

/// A player that guesses at random but remembers what the feedback told it.
///
/// Slots confirmed by an earlier scorecard are kept; colors shown wrong at a
/// slot are not tried there again. Guesses always respect the adjacency rule,
/// since the collector could not accept anything else.
pub struct RandomPlayer {
    rng: StdRng,
    confirmed: Vec<Option<Symbol>>,
    ruled_out: Vec<HashSet<Symbol>>,
    last_guess: Vec<Symbol>,
    pending: VecDeque<RawReading>,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        RandomPlayer {
            rng,
            confirmed: Vec::new(),
            ruled_out: Vec::new(),
            last_guess: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Forget everything learned about the previous target.
    pub fn reset(&mut self, slots: usize) {
        self.confirmed = vec![None; slots];
        self.ruled_out = vec![HashSet::new(); slots];
        self.last_guess.clear();
        self.pending.clear();
    }

    /// Pick the next guess and queue the readings that present it.
    pub fn plan_guess(&mut self, slots: usize) -> Vec<Symbol> {
        if self.confirmed.len() != slots {
            self.reset(slots);
        }

        let mut guess: Vec<Symbol> = Vec::with_capacity(slots);
        for slot in 0..slots {
            let symbol = match self.confirmed[slot] {
                Some(symbol) => symbol,
                None => self.pick(slot, guess.last().copied()),
            };
            guess.push(symbol);
        }

        self.pending.clear();
        for &symbol in &guess {
            self.pending.push_back(RawReading::of(symbol));
            self.pending.push_back(RawReading::default());
        }
        self.last_guess = guess.clone();
        guess
    }

    /// Learn from a scorecard for the last planned guess.
    pub fn learn(&mut self, scorecard: &Scorecard) {
        for (slot, masked) in scorecard.masked.iter().enumerate() {
            match masked {
                Some(symbol) => self.confirmed[slot] = Some(*symbol),
                None => {
                    if let Some(&wrong) = self.last_guess.get(slot) {
                        self.ruled_out[slot].insert(wrong);
                    }
                }
            }
        }
    }

    fn pick(&mut self, slot: usize, previous: Option<Symbol>) -> Symbol {
        let next_confirmed = self.confirmed.get(slot + 1).copied().flatten();
        let fits = |s: &Symbol| Some(*s) != previous && Some(*s) != next_confirmed;

        let mut candidates: Vec<Symbol> = Symbol::ALL
            .into_iter()
            .filter(|s| fits(s) && !self.ruled_out[slot].contains(s))
            .collect();
        if candidates.is_empty() {
            candidates = Symbol::ALL.into_iter().filter(fits).collect();
        }
        if candidates.is_empty() {
            candidates = Symbol::ALL
                .into_iter()
                .filter(|s| Some(*s) != previous)
                .collect();
        }

        candidates[self.rng.random_range(0..candidates.len())]
    }

    fn next_reading(&mut self) -> RawReading {
        self.pending.pop_front().unwrap_or_default()
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sensor half of a shared [`RandomPlayer`].
pub struct PlayerSensor(pub Rc<RefCell<RandomPlayer>>);

impl SensorSource for PlayerSensor {
    fn sample(&mut self) -> RawReading {
        self.0.borrow_mut().next_reading()
    }
}

/// Display half of a shared [`RandomPlayer`]: turns render commands into
/// what the player sees and reacts to.
pub struct PlayerDisplay(pub Rc<RefCell<RandomPlayer>>);

impl DisplaySink for PlayerDisplay {
    fn draw_slots(&mut self, count: usize, _layout: SlotLayout) {
        self.0.borrow_mut().plan_guess(count);
    }

    fn render_symbol(&mut self, _slot: usize, _symbol: Symbol) {}

    fn show_right_count(&mut self, _correct: usize) {}

    fn show_outcome(&mut self, _outcome: GameOutcome) {}

    fn show_masked(&mut self, scorecard: &Scorecard) {
        self.0.borrow_mut().learn(scorecard);
    }

    fn show_instructions(&mut self, level: Level) {
        self.0.borrow_mut().reset(level.num_slots());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::score;

    #[test]
    fn test_planned_guess_respects_adjacency() {
        let mut player = RandomPlayer::with_seed(5);
        for _ in 0..200 {
            player.reset(5);
            let guess = player.plan_guess(5);
            assert_eq!(guess.len(), 5);
            assert!(guess.windows(2).all(|pair| pair[0] != pair[1]), "{guess:?}");
        }
    }

    #[test]
    fn test_confirmed_slots_are_kept() {
        let target = [Symbol::Red, Symbol::Blue, Symbol::Green];
        let mut player = RandomPlayer::with_seed(1);
        player.reset(3);

        let first = player.plan_guess(3);
        let card = score(&first, &target).unwrap();
        player.learn(&card);

        let second = player.plan_guess(3);
        for (slot, masked) in card.masked.iter().enumerate() {
            if let Some(symbol) = masked {
                assert_eq!(second[slot], *symbol);
            }
        }
    }

    #[test]
    fn test_ruled_out_colors_are_not_retried() {
        let target = [Symbol::Blue];
        let mut player = RandomPlayer::with_seed(9);
        player.reset(1);

        let mut tried = Vec::new();
        for _ in 0..Symbol::ALL.len() {
            let guess = player.plan_guess(1);
            assert!(!tried.contains(&guess[0]), "retried {:?}", guess[0]);
            let card = score(&guess, &target).unwrap();
            if card.is_perfect() {
                return;
            }
            tried.push(guess[0]);
            player.learn(&card);
        }
        panic!("every color was tried without hitting the target");
    }

    #[test]
    fn test_sensor_presents_each_planned_card_then_goes_dark() {
        let player = Rc::new(RefCell::new(RandomPlayer::with_seed(3)));
        let mut display = PlayerDisplay(Rc::clone(&player));
        let mut sensor = PlayerSensor(Rc::clone(&player));

        display.draw_slots(3, crate::game::slot_layout(3));
        let planned = player.borrow().last_guess.clone();

        for symbol in planned {
            assert_eq!(sensor.sample(), RawReading::of(symbol));
            assert_eq!(sensor.sample(), RawReading::default());
        }
        assert_eq!(sensor.sample(), RawReading::default());
    }
}
