use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Labels the prayer times endpoint is known to emit, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrayerName {
    Fajir,
    Duhur,
    /// Only sent on Fridays.
    Jumuah,
    Asr,
    Maghrib,
    Isha,
    Tahajjud,
}

impl PrayerName {
    pub const ORDER: [PrayerName; 7] = [
        PrayerName::Fajir,
        PrayerName::Duhur,
        PrayerName::Jumuah,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
        PrayerName::Tahajjud,
    ];

    /// The label exactly as it appears in the endpoint's JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Fajir => "Fajir",
            PrayerName::Duhur => "Duhur",
            PrayerName::Jumuah => "Jumuah",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
            PrayerName::Tahajjud => "Tahajjud",
        }
    }

    /// Exact match on the wire label. Other spellings are unknown labels
    /// so two distinct keys never share a slot.
    pub fn from_label(label: &str) -> Option<PrayerName> {
        PrayerName::ORDER.into_iter().find(|p| p.as_str() == label)
    }

    pub fn rank(&self) -> usize {
        *self as usize
    }
}

/// Sort key for a label: known labels by their fixed slot, anything else
/// after them by name.
pub fn label_order(label: &str) -> (usize, &str) {
    match PrayerName::from_label(label) {
        Some(name) => (name.rank(), ""),
        None => (PrayerName::ORDER.len(), label),
    }
}

/// Prayer label to 12-hour time-of-day text, as served by the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrayerMap(BTreeMap<String, String>);

impl PrayerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in display order.
    pub fn ordered(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_by(|a, b| label_order(a.0).cmp(&label_order(b.0)));
        entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PrayerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PrayerMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The soonest upcoming entry of a [`PrayerMap`].
#[derive(Debug, Clone)]
pub struct NextPrayer<Tz: TimeZone = Local> {
    pub label: String,
    pub at: DateTime<Tz>,
}
