use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};
use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::models::PrayerMap;
use crate::prayer_times::FetchError;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    /// Countdown timer fired.
    Tick,
    /// Auto-refresh timer fired.
    Refresh,
    Fetched {
        seq: u64,
        result: Result<PrayerMap, FetchError>,
    },
}

/// Single inbox for terminal input, timers and fetch results.
pub struct EventHandler {
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_input_reader(tx.clone());
        Self { tx, rx }
    }

    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_input_reader(tx: UnboundedSender<Event>) {
    let poll_timeout = Duration::from_millis(250);

    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(poll_timeout) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!("Terminal poll failed: {}", e);
                    break;
                }
            }

            let forwarded = match event::read() {
                Ok(CEvent::Key(key)) => tx.send(Event::Key(key)),
                Ok(CEvent::Resize(..)) => tx.send(Event::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    warn!("Terminal read failed: {}", e);
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        }
    });
}
