//! Calendar activity layout engine.
//!
//! # Responsibility
//! - Compute side-by-side placement for overlapping activities of one day.
//! - Map start times to vertical grid fractions.
//!
//! # Invariants
//! - The pipeline is pure: same snapshot in, same layout out.
//! - Output is ordered by start time, cluster by cluster.
//! - Nothing here performs I/O or keeps state between calls.
//!
//! Pipeline: `cluster` -> `columns` -> `compose`; `grid` is used by the
//! renderer independently of the horizontal geometry.

pub mod cluster;
pub mod columns;
pub mod compose;
pub mod grid;

use crate::model::activity::Activity;
use cluster::cluster_activities;
use columns::assign_columns;
use compose::{compose_cluster, PositionedActivity};
use log::debug;

/// Z-index given to column 0 unless overridden.
pub const DEFAULT_BASE_Z_INDEX: i32 = 10;

/// Tunables for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutOptions {
    /// Z-index of column 0; column `n` gets `base_z_index + n`.
    pub base_z_index: i32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            base_z_index: DEFAULT_BASE_Z_INDEX,
        }
    }
}

/// Lays out one day of activities with default options.
///
/// The caller is expected to bucket activities by day first; see
/// [`crate::schedule::bucket_by_day`].
pub fn layout_day(activities: &[Activity]) -> Vec<PositionedActivity> {
    layout_day_with(activities, &LayoutOptions::default())
}

/// Lays out one day of activities.
///
/// Empty input yields empty output.
pub fn layout_day_with(
    activities: &[Activity],
    options: &LayoutOptions,
) -> Vec<PositionedActivity> {
    let clusters = cluster_activities(activities);
    let mut positioned = Vec::with_capacity(activities.len());
    let mut max_columns = 0;

    for cluster in &clusters {
        let assignment = assign_columns(cluster);
        max_columns = max_columns.max(assignment.total_columns());
        positioned.extend(compose_cluster(cluster, &assignment, options.base_z_index));
    }

    debug!(
        "event=layout_day module=layout status=ok activities={} clusters={} max_columns={}",
        activities.len(),
        clusters.len(),
        max_columns
    );
    positioned
}
