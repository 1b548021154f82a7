pub mod prayer;
pub mod state;

pub use prayer::{label_order, NextPrayer, PrayerMap, PrayerName};
pub use state::{ClientState, Connectivity};
