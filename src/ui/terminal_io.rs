//! Terminal stand-ins for the color sensor and the display.

use std::fmt::Display;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use super::game_view;
use super::view::BoardView;
use crate::game::{
    CancelToken, DisplaySink, GameOutcome, Level, RawReading, Scorecard, SensorSource, SlotLayout,
    Symbol,
};

/// What a key press means to the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Card(Symbol),
    Abandon,
    Quit,
    Other,
}

pub fn key_action(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Card(Symbol::Red),
        KeyCode::Char('b') | KeyCode::Char('B') => KeyAction::Card(Symbol::Blue),
        KeyCode::Char('g') | KeyCode::Char('G') => KeyAction::Card(Symbol::Green),
        KeyCode::Esc => KeyAction::Abandon,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::Other,
    }
}

/// Keyboard-driven color sensor.
///
/// A card key shows that card to the sensor for exactly one sample; every
/// other sample reads dark. Each sample waits up to `poll_interval` for a key.
pub struct KeyboardSensor {
    poll_interval: Duration,
    cancel: CancelToken,
    quit_requested: bool,
}

impl KeyboardSensor {
    pub fn new(poll_interval: Duration, cancel: CancelToken) -> Self {
        KeyboardSensor {
            poll_interval,
            cancel,
            quit_requested: false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Block until a key is pressed. Returns `false` if it was a quit key.
    pub fn wait_for_key(&mut self) -> io::Result<bool> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key_action(key) == KeyAction::Quit {
                    self.quit_requested = true;
                    return Ok(false);
                }
                return Ok(true);
            }
        }
    }

    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

impl SensorSource for KeyboardSensor {
    fn sample(&mut self) -> RawReading {
        let key = match self.read_key() {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(%err, "failed to read terminal event");
                None
            }
        };

        match key.map(key_action) {
            Some(KeyAction::Card(symbol)) => RawReading::of(symbol),
            Some(KeyAction::Quit) => {
                self.quit_requested = true;
                self.cancel.cancel();
                RawReading::default()
            }
            Some(KeyAction::Abandon) => {
                self.cancel.cancel();
                RawReading::default()
            }
            Some(KeyAction::Other) | None => RawReading::default(),
        }
    }
}

/// Display that keeps a [`BoardView`] and redraws it after every command.
pub struct TerminalDisplay<B: Backend> {
    terminal: Terminal<B>,
    view: BoardView,
}

impl<B: Backend> TerminalDisplay<B>
where
    B::Error: Display,
{
    pub fn new(terminal: Terminal<B>) -> Self {
        TerminalDisplay {
            terminal,
            view: BoardView::new(),
        }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Show the level prompt.
    pub fn show_level_menu(&mut self) {
        self.view.choose_level();
        self.redraw();
    }

    /// Replace the message line.
    pub fn show_message(&mut self, message: impl Into<String>) {
        self.view.message = Some(message.into());
        self.redraw();
    }

    pub fn redraw(&mut self) {
        let view = &self.view;
        if let Err(err) = self.terminal.draw(|f| game_view::render(f, view)) {
            tracing::warn!(%err, "failed to draw");
        }
    }
}

impl<B: Backend> DisplaySink for TerminalDisplay<B>
where
    B::Error: Display,
{
    fn draw_slots(&mut self, count: usize, layout: SlotLayout) {
        self.view.set_slots(count, layout);
        self.redraw();
    }

    fn render_symbol(&mut self, slot: usize, symbol: Symbol) {
        self.view.set_symbol(slot, symbol);
        self.redraw();
    }

    fn show_right_count(&mut self, correct: usize) {
        self.view.set_right_count(correct);
        self.redraw();
    }

    fn show_outcome(&mut self, outcome: GameOutcome) {
        self.view.set_outcome(outcome);
        self.redraw();
    }

    fn show_masked(&mut self, scorecard: &Scorecard) {
        self.view.push_scorecard(scorecard);
        self.redraw();
    }

    fn show_attempt(&mut self, attempt: usize, total: usize) {
        self.view.begin_attempt(attempt, total);
        self.redraw();
    }

    fn show_instructions(&mut self, level: Level) {
        self.view.begin_level(level);
        self.redraw();
    }
}
