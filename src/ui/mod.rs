//! Terminal host: a keyboard stands in for the color sensor and a ratatui
//! screen for the display.

mod app;
pub mod board_widget;
mod game_view;
pub mod terminal_io;
pub mod view;

pub use app::App;
pub use terminal_io::{KeyboardSensor, TerminalDisplay};
pub use view::{BoardView, Screen};
