use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone};

use crate::models::{NextPrayer, PrayerMap};

/// Split "h:mm am" / "hh:mmpm" into a 24-hour (hour, minute) pair.
///
/// The marker is case-insensitive and may be separated from the digits by
/// whitespace. Hours outside 1-12 and minutes that are not exactly two
/// digits in 00-59 are rejected.
pub fn parse_twelve_hour(text: &str) -> Option<(u32, u32)> {
    let lower = text.trim().to_ascii_lowercase();
    let rest = lower.strip_suffix('m')?;
    let (rest, pm) = match rest.strip_suffix('p') {
        Some(rest) => (rest, true),
        None => (rest.strip_suffix('a')?, false),
    };

    let (hour, minute) = rest.trim_end().split_once(':')?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
        return None;
    }

    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Some((hour, minute))
}

/// Resolve a 12-hour clock string to the first matching instant strictly
/// after `reference`, on the reference's day or the day after.
///
/// Returns `None` for malformed text. A wall-clock time skipped by a DST
/// transition moves on to the next day. When a time occurs twice, the
/// earlier occurrence is used unless only the later one is still ahead.
pub fn parse_clock_time<Tz: TimeZone>(text: &str, reference: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let (hour, minute) = parse_twelve_hour(text)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let tz = reference.timezone();
    let today = reference.date_naive();

    let after_reference = |date: NaiveDate| {
        let at = match tz.from_local_datetime(&date.and_time(time)) {
            LocalResult::Single(at) => at,
            LocalResult::Ambiguous(earlier, later) => {
                if earlier > *reference {
                    earlier
                } else {
                    later
                }
            }
            LocalResult::None => return None,
        };
        (at > *reference).then_some(at)
    };

    after_reference(today).or_else(|| today.succ_opt().and_then(after_reference))
}

/// Pick the entry whose next occurrence is soonest.
///
/// Unparseable entries are skipped. On an exact tie the label that comes
/// first in display order wins.
pub fn select_next<Tz: TimeZone>(map: &PrayerMap, now: &DateTime<Tz>) -> Option<NextPrayer<Tz>> {
    map.ordered()
        .into_iter()
        .filter_map(|(label, text)| parse_clock_time(text, now).map(|at| (label, at)))
        .min_by(|a, b| a.1.cmp(&b.1))
        .map(|(label, at)| NextPrayer {
            label: label.to_string(),
            at,
        })
}
