use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: usize) -> &'static str {
    match month {
        1..=12 => HIJRI_MONTH_NAMES[month - 1],
        _ => "Unknown",
    }
}

/// Hijri date for `date`, shifted by `offset_days` for local moon sighting
/// (e.g. -1 where the month starts a day later than in Saudi Arabia).
///
/// `None` when the shifted date is outside the converter's supported range.
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> Option<String> {
    let Some(adjusted) = date.checked_add_signed(Duration::days(offset_days as i64)) else {
        log::warn!("Hijri offset of {} days is out of range for {}", offset_days, date);
        return None;
    };
    match HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    ) {
        Ok(hd) => Some(format!("{} {} {}", hd.day(), hijri_month_name(hd.month()), hd.year())),
        Err(e) => {
            log::warn!("Hijri conversion failed for {}: {}", adjusted, e);
            None
        }
    }
}
