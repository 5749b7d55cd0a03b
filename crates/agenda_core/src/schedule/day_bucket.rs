//! Calendar-day bucketing.
//!
//! # Invariants
//! - Dates are read in each timestamp's own offset; no zone conversion.
//! - Buckets keep input order; days iterate ascending.
//! - An activity running past midnight stays in the day it starts in.

use crate::model::activity::Activity;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Groups activities by the calendar date of their start.
pub fn bucket_by_day(activities: &[Activity]) -> BTreeMap<NaiveDate, Vec<Activity>> {
    let mut days: BTreeMap<NaiveDate, Vec<Activity>> = BTreeMap::new();
    for activity in activities {
        days.entry(activity.start_time.date_naive())
            .or_default()
            .push(activity.clone());
    }
    days
}
