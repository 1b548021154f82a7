use chrono::{DateTime, NaiveDate, TimeZone};

/// Milliseconds from `now` until `target`; negative once it has passed.
pub fn remaining_millis<Tz: TimeZone, Tz2: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz2>) -> i64 {
    target.timestamp_millis() - now.timestamp_millis()
}

/// Countdown text "HH:MM:SS". Past targets clamp to zero; hours are not
/// wrapped at 24.
pub fn format_remaining<Tz: TimeZone, Tz2: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz2>) -> String {
    let secs = remaining_millis(target, now).max(0) / 1000;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// "Friday, October 16, 2026"
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
