//! Geometry for positioned activities.
//!
//! Every member of a cluster gets the same width, `1 / total_columns`, even
//! when its own local overlap is lower than the cluster peak.

use crate::layout::cluster::Cluster;
use crate::layout::columns::ColumnAssignment;
use crate::model::activity::Activity;
use serde::Serialize;

/// Activity plus the horizontal geometry the renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedActivity {
    #[serde(flatten)]
    pub activity: Activity,
    pub column_index: usize,
    pub total_columns: usize,
    /// `column_index / total_columns`.
    pub left_fraction: f64,
    /// `1 / total_columns`.
    pub width_fraction: f64,
    /// `base_z + column_index`; later columns paint above earlier ones.
    pub z_index: i32,
    /// Rightmost column of its cluster; renderers skip the trailing divider.
    pub is_last_in_column_set: bool,
}

impl PositionedActivity {
    pub fn id(&self) -> &str {
        self.activity.id.as_str()
    }
}

/// Turns one cluster's column assignment into positioned activities, in
/// cluster order.
pub fn compose_cluster(
    cluster: &Cluster,
    assignment: &ColumnAssignment,
    base_z_index: i32,
) -> Vec<PositionedActivity> {
    let total_columns = assignment.total_columns();
    let columns = total_columns as f64;

    cluster
        .activities()
        .iter()
        .zip(assignment.column_indices())
        .map(|(activity, &column_index)| {
            let column_z = i32::try_from(column_index).unwrap_or(i32::MAX);
            PositionedActivity {
                activity: activity.clone(),
                column_index,
                total_columns,
                left_fraction: column_index as f64 / columns,
                width_fraction: 1.0 / columns,
                z_index: base_z_index.saturating_add(column_z),
                is_last_in_column_set: column_index + 1 == total_columns,
            }
        })
        .collect()
}
