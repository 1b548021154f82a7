use anyhow::{Context, Result};
use chrono::Local;

use crate::config::AppConfig;
use crate::prayer_times::{select_next, Fetcher};
use crate::utils::format::{format_date_long, format_remaining};
use crate::utils::hijri::hijri_string;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

pub fn build_fetcher(config: &AppConfig) -> Result<Fetcher> {
    let endpoint = config.endpoint.resolve()?;
    Fetcher::new(endpoint, config.endpoint.request_timeout()).context("Building HTTP client")
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub async fn handle_times(config: &AppConfig) -> Result<()> {
    let fetcher = build_fetcher(config)?;
    let times = fetcher
        .fetch_times()
        .await
        .with_context(|| format!("Fetching prayer times from {}", fetcher.endpoint()))?;

    let now = Local::now();
    let next = select_next(&times, &now);
    let today = now.date_naive();

    println!();
    println_colored!(GOLD, "  Prayer Times — {}", format_date_long(today));
    if config.display.show_hijri {
        if let Some(hijri) = hijri_string(today, config.display.hijri_offset) {
            println_colored!(DIM, "  {}", hijri);
        }
    }
    println!();

    let next_label = next.as_ref().map(|n| n.label.as_str());
    for (label, time) in times.ordered() {
        if next_label == Some(label) {
            println_colored!(BOLD, "  {:<10}  {:<10}  ← next", label, time);
        } else {
            println_colored!(DIM, "  {:<10}  {}", label, time);
        }
    }

    println!();
    match &next {
        Some(next) => println_colored!(
            AMBER,
            "  Next: {} in {}",
            next.label,
            format_remaining(&next.at, &now)
        ),
        None => println_colored!(DIM, "  No upcoming prayer time could be read"),
    }
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;

    if init {
        if path.exists() {
            println!("  Config already exists at {}", path.display());
        } else {
            AppConfig::default().save_to(&path)?;
            println_colored!(GOLD, "  Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    println_colored!(GOLD, "  Config file: {}", path.display());
    if !path.exists() {
        println_colored!(DIM, "  (not present, using defaults)");
    }
    println!("  Endpoint:    {}", config.endpoint.resolve()?);
    println!();
    print!("{}", toml::to_string_pretty(config).context("Serializing config")?);
    Ok(())
}
