//! Agenda layout use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for laying out a day or a date range.
//! - Validate caller snapshots before they reach the pure engine.
//! - Memoize per-day layouts keyed by snapshot content.
//!
//! # Invariants
//! - Service APIs never bypass `Activity::validate()`.
//! - Activity ids are unique within one day snapshot.
//! - A cache hit returns exactly what a fresh layout pass would return.

use crate::layout::compose::PositionedActivity;
use crate::layout::{layout_day_with, LayoutOptions};
use crate::model::activity::{Activity, ActivityId, ActivityRecord, ActivityValidationError};
use crate::schedule::day_bucket::bucket_by_day;
use chrono::NaiveDate;
use log::{debug, info};
use lru::LruCache;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

/// Upper bound on memoized day layouts kept by one service.
pub const LAYOUT_CACHE_CAPACITY: usize = 64;

pub type LayoutServiceResult<T> = Result<T, LayoutServiceError>;

/// Service-level error for snapshot validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutServiceError {
    Validation(ActivityValidationError),
    DuplicateId(ActivityId),
}

impl Display for LayoutServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate activity id in snapshot: {id}"),
        }
    }
}

impl Error for LayoutServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<ActivityValidationError> for LayoutServiceError {
    fn from(value: ActivityValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Positioned activities for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub activities: Vec<PositionedActivity>,
}

struct CacheEntry {
    snapshot: Vec<Activity>,
    layout: Vec<PositionedActivity>,
}

/// Use-case service wrapping the layout engine with validation and
/// memoization.
///
/// The memo is an LRU keyed by snapshot fingerprint, so a day that keeps
/// being re-rendered stays cached while cold days age out.
pub struct LayoutService {
    options: LayoutOptions,
    cache: LruCache<u64, CacheEntry>,
}

impl Default for LayoutService {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

impl LayoutService {
    /// Creates a service that lays out with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        let capacity = NonZeroUsize::new(LAYOUT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            options,
            cache: LruCache::new(capacity),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lays out one day snapshot.
    ///
    /// # Contract
    /// - Rejects invalid activities and duplicate ids.
    /// - Returns the memoized layout when the same snapshot was seen before.
    pub fn layout_day(
        &mut self,
        activities: &[Activity],
    ) -> LayoutServiceResult<Vec<PositionedActivity>> {
        validate_snapshot(activities)?;

        let fingerprint = snapshot_fingerprint(activities);
        if let Some(entry) = self.cache.get(&fingerprint) {
            if same_snapshot(&entry.snapshot, activities) {
                debug!(
                    "event=layout_cache module=service status=hit activities={}",
                    activities.len()
                );
                return Ok(entry.layout.clone());
            }
        }

        let layout = layout_day_with(activities, &self.options);
        self.cache.put(
            fingerprint,
            CacheEntry {
                snapshot: activities.to_vec(),
                layout: layout.clone(),
            },
        );
        debug!(
            "event=layout_cache module=service status=miss activities={} cached={}",
            activities.len(),
            self.cache.len()
        );
        Ok(layout)
    }

    /// Lays out a multi-day snapshot, one [`DayLayout`] per day with
    /// activities, in ascending date order.
    pub fn layout_range(
        &mut self,
        activities: &[Activity],
    ) -> LayoutServiceResult<Vec<DayLayout>> {
        let days = bucket_by_day(activities);
        let mut layouts = Vec::with_capacity(days.len());
        for (date, day_activities) in days {
            let positioned = self.layout_day(&day_activities)?;
            layouts.push(DayLayout {
                date,
                activities: positioned,
            });
        }

        info!(
            "event=layout_range module=service status=ok activities={} days={}",
            activities.len(),
            layouts.len()
        );
        Ok(layouts)
    }

    /// Decodes wire records and lays out the resulting range.
    pub fn layout_records(
        &mut self,
        records: &[ActivityRecord],
    ) -> LayoutServiceResult<Vec<DayLayout>> {
        let activities = records
            .iter()
            .cloned()
            .map(Activity::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.layout_range(&activities)
    }

    /// Number of memoized day layouts.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops all memoized layouts.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

fn validate_snapshot(activities: &[Activity]) -> LayoutServiceResult<()> {
    let mut seen = BTreeSet::<&str>::new();
    for activity in activities {
        activity.validate()?;
        if !seen.insert(activity.id.as_str()) {
            return Err(LayoutServiceError::DuplicateId(activity.id.clone()));
        }
    }
    Ok(())
}

// `Activity` equality compares instants only; the offset decides the wall
// clock the grid reads, so it must match too.
fn same_snapshot(cached: &[Activity], activities: &[Activity]) -> bool {
    cached.len() == activities.len()
        && cached.iter().zip(activities).all(|(left, right)| {
            left == right && left.start_time.offset() == right.start_time.offset()
        })
}

fn snapshot_fingerprint(activities: &[Activity]) -> u64 {
    let mut hasher = DefaultHasher::new();
    activities.len().hash(&mut hasher);
    for activity in activities {
        activity.id.hash(&mut hasher);
        activity.start_epoch_ms().hash(&mut hasher);
        activity.start_time.offset().local_minus_utc().hash(&mut hasher);
        activity.duration_minutes.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::{
        same_snapshot, snapshot_fingerprint, LayoutService, LayoutServiceError,
        LAYOUT_CACHE_CAPACITY,
    };
    use crate::layout::grid::top_fraction;
    use crate::model::activity::Activity;
    use chrono::{DateTime, Duration};

    fn activity(id: &str, start: &str, minutes: i64) -> Activity {
        Activity::new(id, DateTime::parse_from_rfc3339(start).unwrap()).with_duration(minutes)
    }

    #[test]
    fn fingerprint_depends_on_order_and_content() {
        let a = activity("a", "2024-05-02T09:00:00Z", 30);
        let b = activity("b", "2024-05-02T10:00:00Z", 30);

        let forward = snapshot_fingerprint(&[a.clone(), b.clone()]);
        assert_eq!(forward, snapshot_fingerprint(&[a.clone(), b.clone()]));
        assert_ne!(forward, snapshot_fingerprint(&[b.clone(), a.clone()]));
        assert_ne!(forward, snapshot_fingerprint(&[a, b.with_duration(45)]));
    }

    #[test]
    fn repeated_snapshot_hits_cache() {
        let mut service = LayoutService::default();
        let day = vec![
            activity("a", "2024-05-02T09:00:00Z", 60),
            activity("b", "2024-05-02T09:30:00Z", 60),
        ];

        let first = service.layout_day(&day).unwrap();
        let second = service.layout_day(&day).unwrap();
        assert_eq!(first, second);
        assert_eq!(service.cache_len(), 1);

        service.clear_cache();
        assert_eq!(service.cache_len(), 0);
    }

    #[test]
    fn cache_is_bounded() {
        let mut service = LayoutService::default();
        let base = DateTime::parse_from_rfc3339("2024-05-02T00:00:00Z").unwrap();
        for minute in 0..(LAYOUT_CACHE_CAPACITY as i64 + 5) {
            let day = vec![Activity::new("a", base + Duration::minutes(minute))];
            service.layout_day(&day).unwrap();
        }
        assert_eq!(service.cache_len(), LAYOUT_CACHE_CAPACITY);
    }

    #[test]
    fn frequently_hit_day_survives_a_full_cache_of_misses() {
        let mut service = LayoutService::default();
        let hot = vec![activity("hot", "2024-05-02T09:00:00Z", 60)];
        let hot_layout = service.layout_day(&hot).unwrap();

        let base = DateTime::parse_from_rfc3339("2024-05-03T00:00:00Z").unwrap();
        for minute in 0..LAYOUT_CACHE_CAPACITY as i64 {
            assert_eq!(service.layout_day(&hot).unwrap(), hot_layout);
            let cold = vec![Activity::new("cold", base + Duration::minutes(minute))];
            service.layout_day(&cold).unwrap();
        }

        let hot_key = snapshot_fingerprint(&hot);
        assert_eq!(service.cache_len(), LAYOUT_CACHE_CAPACITY);
        assert!(service
            .cache
            .peek(&hot_key)
            .is_some_and(|entry| same_snapshot(&entry.snapshot, &hot)));
    }

    #[test]
    fn same_instants_in_other_offset_are_not_served_from_cache() {
        let mut service = LayoutService::default();
        let utc = vec![activity("a", "2024-05-02T12:30:00Z", 30)];
        let local = vec![activity("a", "2024-05-02T09:30:00-03:00", 30)];
        assert_eq!(utc, local);
        assert!(!same_snapshot(&utc, &local));

        let utc_layout = service.layout_day(&utc).unwrap();
        let local_layout = service.layout_day(&local).unwrap();

        assert_eq!(top_fraction(&utc_layout[0].activity.start_time), 750.0 / 1440.0);
        assert_eq!(top_fraction(&local_layout[0].activity.start_time), 570.0 / 1440.0);
        assert_eq!(service.cache_len(), 2);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut service = LayoutService::default();
        let err = service
            .layout_day(&[
                activity("dup", "2024-05-02T09:00:00Z", 30),
                activity("dup", "2024-05-02T11:00:00Z", 30),
            ])
            .unwrap_err();
        assert_eq!(err, LayoutServiceError::DuplicateId("dup".to_string()));
    }
}
