use serde::{Deserialize, Serialize};

use super::scoring::score;
use super::{
    slot_layout, DisplaySink, GuessCollector, Level, LevelSelector, Scorecard, SensorSource,
    SequenceGenerator, TargetSource,
};
use crate::error::{ReadError, SessionError};

/// Terminal result of one play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win,
    Lose,
}

/// Where a session currently is in its play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    ChoosingLevel,
    ShowingInstructions(Level),
    AwaitingTarget,
    CollectingGuess { attempt: usize },
    Scoring { attempt: usize },
    Finished(GameOutcome),
}

/// Runs play-throughs against an injected sensor and display.
///
/// The session owns both capabilities plus the target source. One call to
/// [`GameSession::run_level`] is one game: the target is generated once, then
/// guesses are collected and scored until one is perfect or the attempt
/// budget runs out.
pub struct GameSession<S, D, T = SequenceGenerator> {
    sensor: S,
    display: D,
    targets: T,
    collector: GuessCollector,
    selector: LevelSelector,
    phase: SessionPhase,
    history: Vec<Scorecard>,
}

impl<S: SensorSource, D: DisplaySink> GameSession<S, D> {
    /// Session with an entropy-seeded generator and unbounded reads.
    pub fn new(sensor: S, display: D) -> Self {
        Self::with_parts(sensor, display, SequenceGenerator::new(), GuessCollector::default())
    }
}

impl<S: SensorSource, D: DisplaySink, T: TargetSource> GameSession<S, D, T> {
    pub fn with_parts(sensor: S, display: D, targets: T, collector: GuessCollector) -> Self {
        let mut selector = LevelSelector::new(*collector.classifier(), collector.limit());
        if let Some(cancel) = collector.cancel_token() {
            selector = selector.with_cancel(cancel.clone());
        }
        GameSession {
            sensor,
            display,
            targets,
            collector,
            selector,
            phase: SessionPhase::ChoosingLevel,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Scorecards of the current or most recent play-through, in order.
    pub fn history(&self) -> &[Scorecard] {
        &self.history
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_parts(self) -> (S, D, T) {
        (self.sensor, self.display, self.targets)
    }

    /// Wait for the level prompt card.
    pub fn choose_level(&mut self) -> Result<Level, ReadError> {
        self.enter(SessionPhase::ChoosingLevel);
        self.selector.await_level(&mut self.sensor)
    }

    /// Play one full game at `level`.
    pub fn run_level(&mut self, level: Level) -> Result<GameOutcome, SessionError> {
        let slots = level.num_slots();
        let attempts = level.num_attempts();
        self.history.clear();
        tracing::info!(level = %level, slots, attempts, "session started");

        self.enter(SessionPhase::ShowingInstructions(level));
        self.display.show_instructions(level);

        self.enter(SessionPhase::AwaitingTarget);
        let target = match self.targets.generate(slots) {
            Ok(target) => target,
            Err(err) => return Err(self.abort(err.into())),
        };

        for attempt in 1..=attempts {
            self.enter(SessionPhase::CollectingGuess { attempt });
            self.display.show_attempt(attempt, attempts);
            self.display.draw_slots(slots, slot_layout(slots));

            let guess = match self.collector.collect(&mut self.sensor, &mut self.display, slots) {
                Ok(guess) => guess,
                Err(err) => return Err(self.abort(err)),
            };

            self.enter(SessionPhase::Scoring { attempt });
            let scorecard = match score(&guess, &target) {
                Ok(scorecard) => scorecard,
                Err(err) => return Err(self.abort(err.into())),
            };
            tracing::debug!(attempt, correct = scorecard.correct, "guess scored");

            self.display.show_masked(&scorecard);
            self.display.show_right_count(scorecard.correct);
            let perfect = scorecard.is_perfect();
            self.history.push(scorecard);

            if perfect {
                return Ok(self.finish(GameOutcome::Win));
            }
        }

        Ok(self.finish(GameOutcome::Lose))
    }

    fn enter(&mut self, phase: SessionPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    fn finish(&mut self, outcome: GameOutcome) -> GameOutcome {
        self.enter(SessionPhase::Finished(outcome));
        self.display.show_outcome(outcome);
        tracing::info!(?outcome, attempts_used = self.history.len(), "session finished");
        outcome
    }

    fn abort(&mut self, err: SessionError) -> SessionError {
        tracing::warn!(%err, "session aborted");
        self.enter(SessionPhase::ChoosingLevel);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ScoreError, SequenceError};
    use crate::game::testing::{DisplayEvent, FixedTarget, RecordingDisplay, ScriptedSensor};
    use crate::game::{CancelToken, ReadLimit, Symbol, SymbolClassifier};
    use Symbol::{Blue, Green, Red};

    fn session(
        target: Vec<Symbol>,
        guesses: &[Symbol],
    ) -> GameSession<ScriptedSensor, RecordingDisplay, FixedTarget> {
        GameSession::with_parts(
            ScriptedSensor::presenting(guesses),
            RecordingDisplay::default(),
            FixedTarget(target),
            GuessCollector::default(),
        )
    }

    #[test]
    fn test_first_guess_wins_without_a_second_attempt() {
        let mut game = session(vec![Red, Blue, Green], &[Red, Blue, Green]);

        assert_eq!(game.run_level(Level::Easy), Ok(GameOutcome::Win));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.display().attempts_shown(), 1);
        // R, dark, B, dark, G: nothing read after the winning slot
        assert_eq!(game.sensor().samples_taken(), 5);
        assert_eq!(game.phase(), SessionPhase::Finished(GameOutcome::Win));
    }

    #[test]
    fn test_loses_after_exactly_three_attempts() {
        let wrong = [Green, Red, Blue];
        let guesses: Vec<Symbol> = wrong.iter().cycle().take(9).copied().collect();
        let mut game = session(vec![Red, Blue, Green], &guesses);

        assert_eq!(game.run_level(Level::Easy), Ok(GameOutcome::Lose));
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.display().attempts_shown(), 3);
        assert_eq!(game.sensor().samples_taken(), 17);
        assert!(game.history().iter().all(|card| card.correct == 0));
    }

    #[test]
    fn test_wins_on_a_later_attempt() {
        let mut game = session(
            vec![Red, Blue, Green],
            &[Red, Green, Blue, Red, Blue, Green],
        );

        assert_eq!(game.run_level(Level::Easy), Ok(GameOutcome::Win));
        let corrects: Vec<usize> = game.history().iter().map(|c| c.correct).collect();
        assert_eq!(corrects, vec![1, 3]);
    }

    #[test]
    fn test_display_commands_in_order() {
        let mut game = session(vec![Red, Blue, Green], &[Red, Blue, Green]);
        game.run_level(Level::Easy).unwrap();

        assert_eq!(
            game.display().events,
            vec![
                DisplayEvent::Instructions(Level::Easy),
                DisplayEvent::Attempt(1, 3),
                DisplayEvent::Slots(3, slot_layout(3)),
                DisplayEvent::Symbol(0, Red),
                DisplayEvent::Symbol(1, Blue),
                DisplayEvent::Symbol(2, Green),
                DisplayEvent::Masked(vec![Some(Red), Some(Blue), Some(Green)]),
                DisplayEvent::RightCount(3),
                DisplayEvent::Outcome(GameOutcome::Win),
            ]
        );
    }

    #[test]
    fn test_hard_level_uses_five_slots_and_attempts() {
        let target = vec![Red, Blue, Red, Green, Blue];
        let wrong = [Blue, Red, Blue, Red, Green];
        let guesses: Vec<Symbol> = wrong.iter().cycle().take(25).copied().collect();
        let mut game = session(target, &guesses);

        assert_eq!(game.run_level(Level::Hard), Ok(GameOutcome::Lose));
        assert_eq!(game.history().len(), 5);
        assert!(game.history().iter().all(|card| card.len() == 5));
    }

    #[test]
    fn test_history_resets_between_runs() {
        let guesses = [Red, Green, Blue, Red, Blue, Green, Red, Blue, Green];
        let mut game = session(vec![Red, Blue, Green], &guesses);

        game.run_level(Level::Easy).unwrap();
        assert_eq!(game.history().len(), 2);
        game.run_level(Level::Easy).unwrap();
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_target_of_wrong_length_is_a_score_error() {
        let mut game = session(vec![Red, Blue], &[Red, Blue, Green]);
        assert_eq!(
            game.run_level(Level::Easy),
            Err(SessionError::Score(ScoreError::LengthMismatch {
                guess: 3,
                target: 2
            }))
        );
        assert_eq!(game.phase(), SessionPhase::ChoosingLevel);
    }

    #[test]
    fn test_invalid_target_aborts_before_any_guess() {
        let mut game = session(vec![], &[Red, Blue, Green]);
        assert_eq!(
            game.run_level(Level::Easy),
            Err(SessionError::Sequence(SequenceError::Empty))
        );
        assert_eq!(game.sensor().samples_taken(), 0);
        assert_eq!(game.display().attempts_shown(), 0);
    }

    #[test]
    fn test_cancelled_read_produces_no_outcome() {
        let cancel = CancelToken::new();
        let sensor = ScriptedSensor::presenting(&[Red]).cancel_after(10, cancel.clone());
        let mut game = GameSession::with_parts(
            sensor,
            RecordingDisplay::default(),
            FixedTarget(vec![Red, Blue, Green]),
            GuessCollector::default().with_cancel(cancel),
        );

        assert_eq!(
            game.run_level(Level::Easy),
            Err(SessionError::Read(ReadError::Cancelled))
        );
        assert!(!game
            .display()
            .events
            .iter()
            .any(|e| matches!(e, DisplayEvent::Outcome(_))));
    }

    #[test]
    fn test_seeded_generator_target_can_be_won() {
        let target = SequenceGenerator::with_seed(99).generate(4).unwrap();
        let mut game = GameSession::with_parts(
            ScriptedSensor::presenting(&target),
            RecordingDisplay::default(),
            SequenceGenerator::with_seed(99),
            GuessCollector::new(SymbolClassifier::default(), ReadLimit::Unbounded),
        );

        assert_eq!(game.run_level(Level::Medium), Ok(GameOutcome::Win));
    }

    #[test]
    fn test_choose_level_reads_from_session_sensor() {
        let mut game = session(vec![Red, Blue, Green], &[Red]);
        assert_eq!(game.choose_level(), Ok(Level::Hard));
        assert_eq!(game.phase(), SessionPhase::ChoosingLevel);
    }
}
