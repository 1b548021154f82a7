use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::tui::events::Event;

/// A spawned timer that posts an event every `period`. Aborted on drop.
pub struct PeriodicTask {
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    pub fn spawn<F>(period: Duration, tx: UnboundedSender<Event>, make_event: F) -> Self
    where
        F: Fn() -> Event + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            // First fire one period from now, not immediately.
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(make_event()).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Owns the countdown tick and the auto-refresh timer. Restarting either
/// aborts its previous task first, so each kind runs at most once.
pub struct Scheduler {
    tx: UnboundedSender<Event>,
    tick_period: Duration,
    refresh_period: Duration,
    tick: Option<PeriodicTask>,
    refresh: Option<PeriodicTask>,
}

impl Scheduler {
    pub fn new(tx: UnboundedSender<Event>, tick_period: Duration, refresh_period: Duration) -> Self {
        Self {
            tx,
            tick_period,
            refresh_period,
            tick: None,
            refresh: None,
        }
    }

    pub fn start_tick(&mut self) {
        drop(self.tick.take());
        debug!("Starting countdown tick every {:?}", self.tick_period);
        self.tick = Some(PeriodicTask::spawn(self.tick_period, self.tx.clone(), || Event::Tick));
    }

    pub fn start_auto_refresh(&mut self) {
        drop(self.refresh.take());
        debug!("Starting auto refresh every {:?}", self.refresh_period);
        self.refresh = Some(PeriodicTask::spawn(
            self.refresh_period,
            self.tx.clone(),
            || Event::Refresh,
        ));
    }
}
