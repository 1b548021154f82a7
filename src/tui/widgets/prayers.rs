use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::PrayerMap;
use crate::tui::theme;

/// One row per prayer present in `times`, in display order. Only the row
/// matching `next_label` gets the "Next" badge.
pub fn render(frame: &mut Frame, area: Rect, times: Option<&PrayerMap>, next_label: Option<&str>) {
    let block = Block::default()
        .title(Span::styled(" Prayer Times ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let entries = times.map(PrayerMap::ordered).unwrap_or_default();
    if entries.is_empty() {
        let waiting = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  Waiting for prayer times…", theme::dim())),
        ])
        .block(block);
        frame.render_widget(waiting, area);
        return;
    }

    let items: Vec<ListItem> = entries
        .into_iter()
        .map(|(label, time)| {
            let is_next = next_label == Some(label);

            let (icon, note, row_style) = if is_next {
                ("●", "Upcoming prayer", theme::next_row())
            } else {
                ("○", "Scheduled time", theme::surface())
            };

            let mut spans = vec![
                Span::styled(format!("  {} ", icon), if is_next { theme::gold() } else { theme::dim() }),
                Span::styled(format!("{:<10}", label), theme::bold()),
                Span::styled(format!("{:<10}", time), theme::bold()),
                Span::styled(format!("{:<17}", note), theme::dim()),
            ];
            if is_next {
                spans.push(Span::styled(" Next ", theme::next_row()));
            }

            ListItem::new(Line::from(spans)).style(row_style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
