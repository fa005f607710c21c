//! Timing value objects

mod interval;

pub use interval::{Interval, DEFAULT_PASTE_DELAY_MS, DEFAULT_POLL_INTERVAL_MS};
