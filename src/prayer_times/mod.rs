pub mod clock;
pub mod controller;
pub mod fetcher;

pub use clock::{parse_clock_time, select_next};
pub use controller::{Applied, Controller, Tick};
pub use fetcher::{FetchError, Fetcher};
