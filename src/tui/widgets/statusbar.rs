use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::Connectivity;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, connectivity: Connectivity, error: Option<&str>) {
    let [banner_area, bar_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    if let Some(message) = error {
        let banner = Paragraph::new(Line::from(Span::styled(format!("✗ {}", message), theme::red())))
            .alignment(Alignment::Center);
        frame.render_widget(banner, banner_area);
    }

    let hints = [("[r]", " refresh  "), ("[?]", " help  "), ("[q]", " quit")];

    let mut spans = vec![
        Span::styled("● ", theme::status(connectivity)),
        Span::styled(connectivity.label(), theme::status(connectivity)),
        Span::styled("    ", theme::dim()),
    ];
    for (key, label) in hints {
        spans.push(Span::styled(key, theme::gold()));
        spans.push(Span::styled(label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, bar_area);
}
