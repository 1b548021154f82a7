use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;
use crate::utils::format::format_date_long;

const PLACEHOLDER: &str = "—";

pub fn render(
    frame: &mut Frame,
    area: Rect,
    today: NaiveDate,
    hijri: Option<&str>,
    next_label: Option<&str>,
    next_time: Option<&str>,
) {
    let gregorian_str = format_date_long(today);

    let title_line = Line::from(vec![
        Span::styled("  أذان  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("azan clock", theme::gold()),
    ]);

    let mut date_spans = Vec::new();
    if let Some(hijri) = hijri {
        date_spans.push(Span::styled(hijri.to_string(), theme::amber()));
        date_spans.push(Span::styled("  ·  ", theme::dim()));
    }
    date_spans.push(Span::styled(gregorian_str, theme::dim()));

    let next_line = Line::from(vec![
        Span::styled("Next  ", theme::dim()),
        Span::styled(
            next_label.unwrap_or(PLACEHOLDER).to_string(),
            theme::gold().add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(next_time.unwrap_or(PLACEHOLDER).to_string(), theme::bold()),
    ]);

    let text = vec![title_line, Line::from(date_spans), next_line];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
