use agenda_core::{assign_columns, cluster_activities, layout_day, Activity, Cluster};
use chrono::{DateTime, Duration, FixedOffset};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn day_start() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-05-02T00:00:00-03:00").unwrap()
}

fn build(specs: Vec<(i64, Option<i64>)>) -> Vec<Activity> {
    specs
        .into_iter()
        .enumerate()
        .map(|(index, (start_minute, duration))| Activity {
            id: format!("act-{index}"),
            start_time: day_start() + Duration::minutes(start_minute),
            duration_minutes: duration,
        })
        .collect()
}

fn arb_day() -> impl Strategy<Value = Vec<Activity>> {
    prop::collection::vec((0i64..1380, prop::option::of(-30i64..240)), 0..24).prop_map(build)
}

/// Disjoint half-open intervals laid end to end with non-negative gaps.
fn arb_disjoint_day() -> impl Strategy<Value = Vec<Activity>> {
    prop::collection::vec((0i64..90, 1i64..120), 0..16).prop_map(|pieces| {
        let mut cursor = 0;
        let mut specs = Vec::with_capacity(pieces.len());
        for (gap, duration) in pieces {
            cursor += gap;
            specs.push((cursor, Some(duration)));
            cursor += duration;
        }
        specs.reverse();
        build(specs)
    })
}

/// Activities with distinct start minutes, so input order cannot matter.
fn arb_distinct_starts() -> impl Strategy<Value = Vec<Activity>> {
    prop::collection::btree_set(0i64..1380, 0..20)
        .prop_flat_map(|starts| {
            let len = starts.len();
            (
                Just(starts),
                prop::collection::vec(prop::option::of(1i64..200), len),
            )
        })
        .prop_map(|(starts, durations)| {
            build(starts.into_iter().zip(durations).collect())
        })
}

fn brute_force_peak(cluster: &Cluster) -> usize {
    cluster
        .activities()
        .iter()
        .map(|probe| {
            let instant = probe.start_epoch_ms();
            cluster
                .activities()
                .iter()
                .filter(|other| other.start_epoch_ms() <= instant && instant < other.end_epoch_ms())
                .count()
        })
        .max()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn disjoint_intervals_never_merge(activities in arb_disjoint_day()) {
        let clusters = cluster_activities(&activities);
        prop_assert_eq!(clusters.len(), activities.len());
    }

    #[test]
    fn column_count_equals_peak_concurrency(activities in arb_day()) {
        for cluster in cluster_activities(&activities) {
            let assignment = assign_columns(&cluster);
            prop_assert_eq!(assignment.total_columns(), brute_force_peak(&cluster));
            prop_assert_eq!(assignment.total_columns(), cluster.peak_concurrency());
        }
    }

    #[test]
    fn shared_column_members_never_overlap(activities in arb_day()) {
        for cluster in cluster_activities(&activities) {
            let assignment = assign_columns(&cluster);
            let members = cluster.activities();
            let columns = assignment.column_indices();
            for left in 0..members.len() {
                for right in (left + 1)..members.len() {
                    if columns[left] == columns[right] {
                        prop_assert!(
                            !members[left].overlaps(&members[right]),
                            "{} and {} share column {}",
                            members[left].id,
                            members[right].id,
                            columns[left]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn width_times_columns_is_one(activities in arb_day()) {
        for item in layout_day(&activities) {
            prop_assert!((item.width_fraction * item.total_columns as f64 - 1.0).abs() < 1e-9);
            prop_assert!(
                (item.left_fraction - item.column_index as f64 / item.total_columns as f64).abs()
                    < 1e-12
            );
            prop_assert!(item.left_fraction >= 0.0 && item.left_fraction < 1.0);
            prop_assert_eq!(item.is_last_in_column_set, item.column_index + 1 == item.total_columns);
        }
    }

    #[test]
    fn rerun_gives_identical_layout(activities in arb_day()) {
        prop_assert_eq!(layout_day(&activities), layout_day(&activities));
    }

    #[test]
    fn input_order_does_not_change_columns(activities in arb_distinct_starts()) {
        let columns = |items: &[Activity]| -> BTreeMap<String, (usize, usize)> {
            layout_day(items)
                .into_iter()
                .map(|item| (item.activity.id.clone(), (item.column_index, item.total_columns)))
                .collect()
        };

        let mut reversed = activities.clone();
        reversed.reverse();
        prop_assert_eq!(columns(&activities), columns(&reversed));
    }

    #[test]
    fn every_activity_is_positioned_once(activities in arb_day()) {
        let layout = layout_day(&activities);
        prop_assert_eq!(layout.len(), activities.len());
        let mut previous = None;
        for item in &layout {
            if let Some(prev) = previous {
                prop_assert!(prev <= item.activity.start_time);
            }
            previous = Some(item.activity.start_time);
        }
    }
}
