use crate::game::{slot_layout, GameOutcome, Level, Scorecard, SlotLayout, Symbol};

/// Which screen the terminal is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ChooseLevel,
    Playing,
    Finished(GameOutcome),
}

/// One scored guess as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRow {
    pub masked: Vec<Option<Symbol>>,
    pub correct: usize,
}

/// Everything the terminal draws, built up from display commands.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub screen: Screen,
    pub level: Option<Level>,
    pub attempt: usize,
    pub total_attempts: usize,
    pub layout: SlotLayout,
    /// Guess being entered; `None` slots are still empty.
    pub current: Vec<Option<Symbol>>,
    pub history: Vec<GuessRow>,
    pub last_correct: Option<usize>,
    pub message: Option<String>,
}

impl BoardView {
    pub fn new() -> Self {
        BoardView {
            screen: Screen::ChooseLevel,
            level: None,
            attempt: 0,
            total_attempts: 0,
            layout: slot_layout(3),
            current: Vec::new(),
            history: Vec::new(),
            last_correct: None,
            message: None,
        }
    }

    /// Back to the level prompt with a clean board.
    pub fn choose_level(&mut self) {
        *self = BoardView {
            message: self.message.take(),
            ..BoardView::new()
        };
    }

    pub fn begin_level(&mut self, level: Level) {
        self.screen = Screen::Playing;
        self.level = Some(level);
        self.attempt = 0;
        self.total_attempts = level.num_attempts();
        self.current.clear();
        self.history.clear();
        self.last_correct = None;
        self.message = Some(format!(
            "Show {} cards in order. {} attempts. A color cannot follow itself.",
            level.num_slots(),
            level.num_attempts()
        ));
    }

    pub fn begin_attempt(&mut self, attempt: usize, total: usize) {
        self.attempt = attempt;
        self.total_attempts = total;
    }

    pub fn set_slots(&mut self, count: usize, layout: SlotLayout) {
        self.layout = layout;
        self.current = vec![None; count];
    }

    pub fn set_symbol(&mut self, slot: usize, symbol: Symbol) {
        if let Some(cell) = self.current.get_mut(slot) {
            *cell = Some(symbol);
        }
    }

    pub fn push_scorecard(&mut self, scorecard: &Scorecard) {
        self.history.push(GuessRow {
            masked: scorecard.masked.clone(),
            correct: scorecard.correct,
        });
        self.current.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn set_right_count(&mut self, correct: usize) {
        self.last_correct = Some(correct);
        self.message = Some(format!("{correct} right"));
    }

    pub fn set_outcome(&mut self, outcome: GameOutcome) {
        self.screen = Screen::Finished(outcome);
        self.message = Some(match outcome {
            GameOutcome::Win => "You win! Press any key to play again, q to quit.".to_string(),
            GameOutcome::Lose => "Out of attempts. Press any key to play again, q to quit.".to_string(),
        });
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::score;
    use Symbol::{Blue, Green, Red};

    #[test]
    fn test_begin_level_resets_board() {
        let mut view = BoardView::new();
        view.history.push(GuessRow {
            masked: vec![None],
            correct: 0,
        });
        view.begin_level(Level::Medium);

        assert_eq!(view.screen, Screen::Playing);
        assert_eq!(view.total_attempts, 4);
        assert!(view.history.is_empty());
    }

    #[test]
    fn test_symbols_fill_current_row() {
        let mut view = BoardView::new();
        view.set_slots(3, slot_layout(3));
        view.set_symbol(1, Blue);
        view.set_symbol(7, Red);
        assert_eq!(view.current, vec![None, Some(Blue), None]);
    }

    #[test]
    fn test_scorecard_moves_guess_into_history() {
        let mut view = BoardView::new();
        view.set_slots(3, slot_layout(3));
        for (slot, symbol) in [Red, Green, Blue].into_iter().enumerate() {
            view.set_symbol(slot, symbol);
        }
        let card = score(&[Red, Green, Blue], &[Red, Blue, Green]).unwrap();
        view.push_scorecard(&card);
        view.set_right_count(card.correct);

        assert_eq!(view.history.len(), 1);
        assert_eq!(view.history[0].masked, vec![Some(Red), None, None]);
        assert_eq!(view.current, vec![None, None, None]);
        assert_eq!(view.message.as_deref(), Some("1 right"));
    }

    #[test]
    fn test_choose_level_keeps_message() {
        let mut view = BoardView::new();
        view.begin_level(Level::Hard);
        view.message = Some("Game aborted".to_string());
        view.choose_level();

        assert_eq!(view.screen, Screen::ChooseLevel);
        assert_eq!(view.level, None);
        assert_eq!(view.message.as_deref(), Some("Game aborted"));
    }
}
