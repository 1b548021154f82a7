use chrono::{DateTime, Local, TimeZone};
use log::{debug, error, info};

use crate::models::{ClientState, Connectivity, PrayerMap};
use crate::prayer_times::clock::select_next;
use crate::prayer_times::fetcher::FetchError;
use crate::utils::format::{format_remaining, remaining_millis};

pub const OFFLINE_MESSAGE: &str = "Could not load times. Check the server connection.";

/// A countdown at or below this many milliseconds triggers a soft refresh.
pub const REFRESH_THRESHOLD_MS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Failed,
    /// A newer request already resolved; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub countdown: Option<String>,
    pub refresh_due: bool,
}

/// Owns the clock's state and orders fetch results by request sequence.
#[derive(Debug)]
pub struct Controller<Tz: TimeZone = Local> {
    state: ClientState<Tz>,
    issued: u64,
    resolved: u64,
}

impl<Tz: TimeZone> Default for Controller<Tz> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> Controller<Tz> {
    pub fn new() -> Self {
        Self {
            state: ClientState::default(),
            issued: 0,
            resolved: 0,
        }
    }

    pub fn state(&self) -> &ClientState<Tz> {
        &self.state
    }

    /// Start a refresh cycle and return its sequence number.
    ///
    /// A soft refresh leaves the status indicator alone.
    pub fn begin_refresh(&mut self, soft: bool) -> u64 {
        self.issued += 1;
        self.state.error = None;
        if !soft {
            self.state.connectivity = Connectivity::Refreshing;
        }
        self.issued
    }

    pub fn apply(
        &mut self,
        seq: u64,
        result: Result<PrayerMap, FetchError>,
        now: &DateTime<Tz>,
    ) -> Applied {
        if seq <= self.resolved {
            debug!("Dropping response #{} (already applied #{})", seq, self.resolved);
            return Applied::Stale;
        }
        self.resolved = seq;

        match result {
            Ok(times) => {
                self.state.next = select_next(&times, now);
                match &self.state.next {
                    Some(next) => info!("Refresh #{}: next prayer is {}", seq, next.label),
                    None => info!("Refresh #{}: no parseable prayer times", seq),
                }
                self.state.current_data = Some(times);
                self.state.connectivity = Connectivity::Online;
                self.state.error = None;
                Applied::Updated
            }
            Err(e) => {
                error!("Refresh #{} failed: {}", seq, e);
                self.state.connectivity = Connectivity::Offline;
                self.state.error = Some(OFFLINE_MESSAGE.to_string());
                Applied::Failed
            }
        }
    }

    pub fn tick(&self, now: &DateTime<Tz>) -> Tick {
        match &self.state.next {
            Some(next) => Tick {
                countdown: Some(format_remaining(&next.at, now)),
                refresh_due: remaining_millis(&next.at, now) <= REFRESH_THRESHOLD_MS,
            },
            None => Tick {
                countdown: None,
                refresh_due: false,
            },
        }
    }
}
