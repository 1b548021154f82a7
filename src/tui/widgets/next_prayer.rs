use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::tui::theme;

/// Quadrant glyphs are 4 cells wide and 4 rows tall.
const GLYPH_WIDTH: u16 = 4;
const GLYPH_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect, countdown: Option<&str>) {
    let block = Block::default()
        .title(Span::styled(" Countdown ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (text, style) = match countdown {
        Some(text) => (text, theme::amber()),
        None => ("--:--:--", theme::dim()),
    };

    let width = text.chars().count() as u16 * GLYPH_WIDTH;
    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(inner);
    let [_, cell, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(GLYPH_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(column);

    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(style)
        .lines(vec![Line::from(text.to_string())])
        .build();
    frame.render_widget(big, cell);
}
