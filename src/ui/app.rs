use std::fmt::Display;
use std::io;
use std::time::Duration;

use ratatui::{backend::Backend, Terminal};

use super::terminal_io::{KeyboardSensor, TerminalDisplay};
use crate::config::AppConfig;
use crate::error::{ReadError, SessionError};
use crate::game::{CancelToken, GameSession, GuessCollector, Level, SequenceGenerator};

/// Terminal host: level prompt, one play-through, outcome, repeat.
pub struct App<B: Backend> {
    session: GameSession<KeyboardSensor, TerminalDisplay<B>>,
    cancel: CancelToken,
    fixed_level: Option<Level>,
}

impl<B: Backend> App<B>
where
    B::Error: Display,
{
    /// `fixed_level` skips the level prompt.
    pub fn new(terminal: Terminal<B>, config: &AppConfig, fixed_level: Option<Level>) -> Self {
        let cancel = CancelToken::new();
        let sensor = KeyboardSensor::new(
            Duration::from_millis(config.input.poll_interval_ms),
            cancel.clone(),
        );
        let collector = GuessCollector::new(config.classifier.classifier(), config.input.read_limit())
            .with_cancel(cancel.clone());

        App {
            session: GameSession::with_parts(
                sensor,
                TerminalDisplay::new(terminal),
                SequenceGenerator::from_config(config.generator.seed),
                collector,
            ),
            cancel,
            fixed_level,
        }
    }

    /// Main application loop
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let level = match self.fixed_level {
                Some(level) => level,
                None => {
                    self.session.display_mut().show_level_menu();
                    match self.session.choose_level() {
                        Ok(level) => level,
                        Err(err) => {
                            if !self.recover(err)? {
                                break;
                            }
                            continue;
                        }
                    }
                }
            };

            match self.session.run_level(level) {
                Ok(_) => {
                    // Outcome is already on screen
                    if !self.session.sensor_mut().wait_for_key()? {
                        break;
                    }
                }
                Err(SessionError::Read(err)) => {
                    if !self.recover(err)? {
                        break;
                    }
                }
                Err(err) => {
                    tracing::error!(%err, "game failed");
                    self.session
                        .display_mut()
                        .show_message(format!("{err}. Press any key."));
                    if !self.session.sensor_mut().wait_for_key()? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle an interrupted read. Returns `false` when the app should exit.
    fn recover(&mut self, err: ReadError) -> io::Result<bool> {
        if self.session.sensor().quit_requested() {
            return Ok(false);
        }
        self.cancel.reset();

        let prompt = recovery_prompt(err, self.fixed_level.is_some());
        self.session.display_mut().show_message(prompt.text);
        if prompt.wait_for_key {
            self.session.sensor_mut().wait_for_key()
        } else {
            Ok(true)
        }
    }
}

/// What to show after an interrupted read.
#[derive(Debug, PartialEq, Eq)]
struct RecoveryPrompt {
    text: String,
    wait_for_key: bool,
}

/// An abandoned game returns straight to the level menu, which keeps the
/// message visible. With a fixed level the next game starts at once, so the
/// message has to wait for a key like a timeout does.
fn recovery_prompt(err: ReadError, fixed_level: bool) -> RecoveryPrompt {
    match err {
        ReadError::Cancelled if fixed_level => RecoveryPrompt {
            text: "Game abandoned. Press any key.".to_string(),
            wait_for_key: true,
        },
        ReadError::Cancelled => RecoveryPrompt {
            text: "Game abandoned".to_string(),
            wait_for_key: false,
        },
        ReadError::Timeout { slot } => RecoveryPrompt {
            text: format!("No card seen for slot {} in time. Press any key.", slot + 1),
            wait_for_key: true,
        },
    }
}
