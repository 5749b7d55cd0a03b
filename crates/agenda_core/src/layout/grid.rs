//! Vertical placement on a 24-hour grid.

use crate::model::activity::Activity;
use chrono::{DateTime, FixedOffset, Timelike};

/// Length of the day span the grid covers, midnight to midnight.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Whole minutes elapsed since local midnight, read in the timestamp's own
/// offset.
pub fn minutes_from_midnight(start: &DateTime<FixedOffset>) -> u32 {
    start.hour() * 60 + start.minute()
}

/// Top edge of a block as a fraction of the day.
pub fn top_fraction(start: &DateTime<FixedOffset>) -> f64 {
    f64::from(minutes_from_midnight(start)) / f64::from(MINUTES_PER_DAY)
}

/// Block height as a fraction of the day, using the effective duration.
///
/// Not clamped; blocks running past midnight exceed the remaining span.
pub fn height_fraction(activity: &Activity) -> f64 {
    activity.effective_duration_minutes() as f64 / f64::from(MINUTES_PER_DAY)
}
