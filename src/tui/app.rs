use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    DefaultTerminal, Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::AppConfig;
use crate::models::PrayerMap;
use crate::prayer_times::{Applied, Controller, FetchError, Fetcher};
use crate::tui::events::{Event, EventHandler};
use crate::tui::scheduler::Scheduler;
use crate::tui::theme;
use crate::tui::widgets::{self, ClockView};
use crate::utils::hijri::hijri_string;

pub struct App {
    pub config: AppConfig,
    pub should_quit: bool,
    pub show_help: bool,

    fetcher: Fetcher,
    controller: Controller<Local>,
    scheduler: Scheduler,
    tx: UnboundedSender<Event>,

    // Derived display state, refreshed on tick/fetch
    countdown: Option<String>,
    today: NaiveDate,
    hijri_str: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, fetcher: Fetcher, tx: UnboundedSender<Event>) -> Self {
        let scheduler = Scheduler::new(
            tx.clone(),
            config.schedule.tick_period(),
            config.schedule.refresh_period(),
        );
        let today = Local::now().date_naive();
        let hijri_str = Self::hijri_for(&config, today);

        App {
            config,
            should_quit: false,
            show_help: false,
            fetcher,
            controller: Controller::new(),
            scheduler,
            tx,
            countdown: None,
            today,
            hijri_str,
        }
    }

    fn hijri_for(config: &AppConfig, date: NaiveDate) -> Option<String> {
        if config.display.show_hijri {
            hijri_string(date, config.display.hijri_offset)
        } else {
            None
        }
    }

    /// First load plus the auto-refresh timer. The first load is soft so the
    /// status keeps reading "Connecting…" until a response arrives.
    pub fn start(&mut self) {
        info!("Polling {}", self.fetcher.endpoint());
        self.refresh(true);
        self.scheduler.start_auto_refresh();
    }

    /// Fire a fetch in the background; its result comes back as
    /// `Event::Fetched`.
    pub fn refresh(&mut self, soft: bool) {
        let seq = self.controller.begin_refresh(soft);
        debug!("Refresh #{} ({})", seq, if soft { "soft" } else { "manual" });

        let fetcher = self.fetcher.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_times().await;
            let _ = tx.send(Event::Fetched { seq, result });
        });
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize => {}
            Event::Tick => self.on_tick(Local::now()),
            Event::Refresh => self.refresh(true),
            Event::Fetched { seq, result } => self.on_fetched(seq, result, Local::now()),
        }
    }

    fn on_fetched(&mut self, seq: u64, result: Result<PrayerMap, FetchError>, now: DateTime<Local>) {
        match self.controller.apply(seq, result, &now) {
            Applied::Updated => {
                self.roll_date(now.date_naive());
                self.countdown = self.controller.tick(&now).countdown;
                self.scheduler.start_tick();
            }
            Applied::Failed | Applied::Stale => {}
        }
    }

    fn on_tick(&mut self, now: DateTime<Local>) {
        self.roll_date(now.date_naive());
        let tick = self.controller.tick(&now);
        self.countdown = tick.countdown;
        if tick.refresh_due {
            self.refresh(true);
        }
    }

    fn roll_date(&mut self, today: NaiveDate) {
        if today != self.today {
            self.today = today;
            self.hijri_str = Self::hijri_for(&self.config, today);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle actual key presses — ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::F(5) => {
                self.refresh(false);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let view = ClockView::new(
            self.controller.state(),
            self.countdown.as_deref(),
            self.today,
            self.hijri_str.as_deref(),
        );
        widgets::render(frame, &view);

        if self.show_help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).min(10),
        };

        frame.render_widget(Clear, popup_area);

        let key_line = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {:<10}", key), theme::gold()),
                Span::styled(what, theme::dim()),
            ])
        };

        let help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            key_line("[r] / F5", "Refresh now"),
            key_line("[?]", "Toggle help"),
            key_line("[q] / Esc", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", self.fetcher.endpoint()),
                theme::dim(),
            )),
        ];

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Run the TUI event loop until the user quits.
pub async fn run(config: AppConfig, fetcher: Fetcher) -> Result<()> {
    let mut events = EventHandler::new();
    let mut app = App::new(config, fetcher, events.sender());

    let mut terminal = ratatui::init();
    app.start();
    let outcome = event_loop(&mut terminal, &mut app, &mut events).await;
    ratatui::restore();
    outcome
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        let Some(event) = events.next().await else {
            break;
        };
        app.handle_event(event);
        if app.should_quit {
            break;
        }
    }
    info!("Exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use crossterm::event::KeyModifiers;
    use reqwest::Url;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use crate::models::Connectivity;

    fn app() -> (App, UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let endpoint = Url::parse("http://127.0.0.1:9/azan_time").unwrap();
        let app = App::new(AppConfig::default(), Fetcher::with_client(client, endpoint), tx);
        (app, rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn local(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, h, m, s).earliest().unwrap()
    }

    #[tokio::test]
    async fn keys_quit_refresh_and_toggle_help() {
        let (mut app, _rx) = app();

        app.handle_key(press(KeyCode::Char('r')));
        assert_eq!(app.controller.state().connectivity, Connectivity::Refreshing);

        app.handle_key(press(KeyCode::Char('?')));
        assert!(app.show_help);
        // Any key closes the overlay without acting on it.
        app.handle_key(press(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn countdown_reaching_zero_triggers_a_fetch() {
        let (mut app, mut rx) = app();
        let times: PrayerMap = [("Fajir", "5:00am"), ("Duhur", "1:15pm")].into_iter().collect();

        let seq = app.controller.begin_refresh(true);
        app.on_fetched(seq, Ok(times), local(13, 14, 0));
        assert_eq!(app.countdown.as_deref(), Some("00:01:00"));

        app.on_tick(local(13, 14, 30));
        assert_eq!(app.countdown.as_deref(), Some("00:00:30"));

        app.on_tick(local(13, 14, 0) + Duration::seconds(59));
        assert_eq!(app.countdown.as_deref(), Some("00:00:01"));

        // The update started the countdown tick; the due countdown issued a fetch.
        let (ticked, fetched) = tokio::time::timeout(std::time::Duration::from_secs(10), async {
            let (mut ticked, mut fetched) = (false, None);
            while !(ticked && fetched.is_some()) {
                match rx.recv().await {
                    Some(Event::Tick) => ticked = true,
                    Some(Event::Fetched { seq, .. }) => fetched = Some(seq),
                    Some(_) => {}
                    None => break,
                }
            }
            (ticked, fetched)
        })
        .await
        .unwrap();
        assert!(ticked);
        assert_eq!(fetched, Some(seq + 1));
    }
}
