use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::game::{SlotLayout, Symbol};

/// Terminal color for a card.
pub fn symbol_color(symbol: Symbol) -> Color {
    match symbol {
        Symbol::Red => Color::Red,
        Symbol::Blue => Color::Blue,
        Symbol::Green => Color::Green,
    }
}

/// One row of slots: filled slots as solid blocks in their color, empty slots
/// as dim shading.
pub fn slot_row_line(slots: &[Option<Symbol>], layout: SlotLayout) -> Line<'static> {
    let width = usize::from(layout.slot_width);
    let gap = " ".repeat(usize::from(layout.gap));
    let mut spans = Vec::with_capacity(slots.len() * 2);

    for (i, slot) in slots.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(gap.clone()));
        }
        let span = match slot {
            Some(symbol) => Span::styled(
                "\u{2588}".repeat(width),
                Style::default().fg(symbol_color(*symbol)),
            ),
            None => Span::styled("\u{2591}".repeat(width), Style::default().fg(Color::DarkGray)),
        };
        spans.push(span);
    }

    Line::from(spans)
}

/// A legend entry such as "■ Blue  Easy", colored like the card.
pub fn legend_line(symbol: Symbol, label: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("\u{25a0} {:<6}", symbol.name()),
            Style::default()
                .fg(symbol_color(symbol))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(label),
    ])
}
