use crate::data_types::Ticks;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::time::Duration;

pub const TICKS_PER_SECOND: i64 = 10_000_000;
const TICKS_PER_MICRO: i64 = 10;

fn epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Source ticks (100 ns since 0001-01-01) as a calendar time. `None` for
/// negative ticks or values past chrono's range.
pub fn ticks_to_datetime(ticks: Ticks) -> Option<NaiveDateTime> {
    if ticks < 0 {
        return None;
    }
    let delta = TimeDelta::microseconds(ticks / TICKS_PER_MICRO);
    epoch()?.checked_add_signed(delta)
}

pub fn datetime_to_ticks(dt: NaiveDateTime) -> Option<Ticks> {
    let delta = dt.signed_duration_since(epoch()?);
    delta.num_microseconds()?.checked_mul(TICKS_PER_MICRO)
}

/// Formats a tick value for activity entries.
pub fn format_ticks(ticks: Ticks) -> String {
    if ticks == Ticks::MIN {
        return "min".to_string();
    }
    match ticks_to_datetime(ticks) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => ticks.to_string(),
    }
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0)
}
