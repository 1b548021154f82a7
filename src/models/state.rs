use chrono::{Local, TimeZone};

use crate::models::{NextPrayer, PrayerMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// No response received yet.
    Connecting,
    Online,
    /// A user-requested refresh is in flight.
    Refreshing,
    Offline,
}

impl Connectivity {
    pub fn label(&self) -> &'static str {
        match self {
            Connectivity::Connecting => "Connecting…",
            Connectivity::Online => "Online",
            Connectivity::Refreshing => "Refreshing…",
            Connectivity::Offline => "Offline",
        }
    }
}

/// Everything the clock shows, rebuilt from each fetch.
#[derive(Debug, Clone)]
pub struct ClientState<Tz: TimeZone = Local> {
    pub current_data: Option<PrayerMap>,
    pub next: Option<NextPrayer<Tz>>,
    pub connectivity: Connectivity,
    /// User-facing error banner; hidden when `None`.
    pub error: Option<String>,
}

impl<Tz: TimeZone> Default for ClientState<Tz> {
    fn default() -> Self {
        Self {
            current_data: None,
            next: None,
            connectivity: Connectivity::Connecting,
            error: None,
        }
    }
}

impl<Tz: TimeZone> ClientState<Tz> {
    pub fn next_label(&self) -> Option<&str> {
        self.next.as_ref().map(|n| n.label.as_str())
    }

    /// The next prayer's time exactly as the endpoint wrote it.
    pub fn next_time_text(&self) -> Option<&str> {
        let label = self.next_label()?;
        self.current_data.as_ref()?.get(label)
    }
}
