pub mod header;
pub mod next_prayer;
pub mod prayers;
pub mod statusbar;

use chrono::{NaiveDate, TimeZone};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};

use crate::models::{ClientState, Connectivity, PrayerMap};
use crate::tui::theme;

/// Everything the dashboard draws. Rendering depends on nothing else, so
/// the same view always produces the same frame.
#[derive(Debug, Clone, Copy)]
pub struct ClockView<'a> {
    pub times: Option<&'a PrayerMap>,
    pub next_label: Option<&'a str>,
    pub next_time: Option<&'a str>,
    pub connectivity: Connectivity,
    pub error: Option<&'a str>,
    pub countdown: Option<&'a str>,
    pub today: NaiveDate,
    pub hijri: Option<&'a str>,
}

impl<'a> ClockView<'a> {
    pub fn new<Tz: TimeZone>(
        state: &'a ClientState<Tz>,
        countdown: Option<&'a str>,
        today: NaiveDate,
        hijri: Option<&'a str>,
    ) -> Self {
        Self {
            times: state.current_data.as_ref(),
            next_label: state.next_label(),
            next_time: state.next_time_text(),
            connectivity: state.connectivity,
            error: state.error.as_deref(),
            countdown,
            today,
            hijri,
        }
    }
}

pub fn render(frame: &mut Frame, view: &ClockView) {
    let area = frame.area();

    frame.render_widget(Block::default().style(theme::base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // header
            Constraint::Length(6), // countdown
            Constraint::Min(4),    // prayer rows
            Constraint::Length(2), // error banner + status
        ])
        .split(area);

    header::render(
        frame,
        chunks[0],
        view.today,
        view.hijri,
        view.next_label,
        view.next_time,
    );
    next_prayer::render(frame, chunks[1], view.countdown);
    prayers::render(frame, chunks[2], view.times, view.next_label);
    statusbar::render(frame, chunks[3], view.connectivity, view.error);
}
