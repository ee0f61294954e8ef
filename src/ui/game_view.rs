use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{legend_line, slot_row_line};
use super::view::{BoardView, Screen};
use crate::game::{GameOutcome, Level, Symbol};

pub fn render(frame: &mut Frame, view: &BoardView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    match view.screen {
        Screen::ChooseLevel => render_level_menu(frame, chunks[1]),
        Screen::Playing | Screen::Finished(_) => render_board(frame, view, chunks[1]),
    }
    render_message(frame, &view.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, view: &BoardView, area: Rect) {
    let (status, color) = match (view.screen, view.level) {
        (Screen::ChooseLevel, _) | (_, None) => ("Choose a level".to_string(), Color::White),
        (Screen::Playing, Some(level)) => (
            format!("{level}  |  Attempt {} of {}", view.attempt, view.total_attempts),
            Color::Cyan,
        ),
        (Screen::Finished(GameOutcome::Win), Some(level)) => {
            (format!("{level}  |  Solved"), Color::Green)
        }
        (Screen::Finished(GameOutcome::Lose), Some(level)) => {
            (format!("{level}  |  Game over"), Color::Red)
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Color Code"));

    frame.render_widget(header, area);
}

fn render_level_menu(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("Show a card to choose the level"), Line::from("")];
    for symbol in [Symbol::Blue, Symbol::Green, Symbol::Red] {
        let level = Level::from_symbol(symbol);
        lines.push(legend_line(
            symbol,
            format!(" {:<7}{} cards", level.name(), level.num_slots()),
        ));
    }

    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(menu, area);
}

fn render_board(frame: &mut Frame, view: &BoardView, area: Rect) {
    let mut lines = Vec::new();

    for (i, row) in view.history.iter().enumerate() {
        let mut line = slot_row_line(&row.masked, view.layout);
        line.spans.insert(0, Span::raw(format!("{:>2}  ", i + 1)));
        line.spans.push(Span::styled(
            format!("  {} right", row.correct),
            Style::default().fg(Color::Yellow),
        ));
        lines.push(line);
        lines.push(Line::from(""));
    }

    if view.screen == Screen::Playing && !view.current.is_empty() {
        let mut line = slot_row_line(&view.current, view.layout);
        line.spans.insert(
            0,
            Span::styled(
                format!("{:>2}  ", view.attempt),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        );
        line.spans.push(Span::raw("         "));
        lines.push(line);
    }

    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("R/B/G: Show card  |  Esc: Abandon game  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
