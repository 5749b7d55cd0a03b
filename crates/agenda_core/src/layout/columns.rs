//! Greedy column assignment inside one cluster.
//!
//! # Responsibility
//! - Place each cluster member into the lowest-indexed column that is free
//!   at its start instant.
//!
//! # Invariants
//! - Members sharing a column never overlap (half-open intervals).
//! - The lowest eligible column index always wins; output is stable for the
//!   same input.
//! - `total_columns` equals the cluster's peak concurrency.

use crate::layout::cluster::Cluster;
use crate::model::activity::ActivityId;

/// Column placement for every member of one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAssignment {
    ids: Vec<ActivityId>,
    column_indices: Vec<usize>,
    total_columns: usize,
}

impl ColumnAssignment {
    /// Column index per member, in cluster (start) order.
    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    /// Number of columns the cluster needs.
    pub fn total_columns(&self) -> usize {
        self.total_columns
    }

    /// Column of the first member carrying `id`.
    pub fn column_of(&self, id: &str) -> Option<usize> {
        self.ids
            .iter()
            .position(|candidate| candidate == id)
            .map(|position| self.column_indices[position])
    }

    /// Iterates `(id, column_index)` pairs in cluster order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.ids
            .iter()
            .map(String::as_str)
            .zip(self.column_indices.iter().copied())
    }
}

/// Assigns columns using greedy earliest-fit over the start-sorted members.
///
/// Each column only remembers the end instant of its latest occupant.
pub fn assign_columns(cluster: &Cluster) -> ColumnAssignment {
    let mut column_ends: Vec<i64> = Vec::new();
    let mut ids = Vec::with_capacity(cluster.len());
    let mut column_indices = Vec::with_capacity(cluster.len());

    for activity in cluster.activities() {
        let start = activity.start_epoch_ms();
        let column = match column_ends.iter().position(|&end| end <= start) {
            Some(free) => free,
            None => {
                column_ends.push(start);
                column_ends.len() - 1
            }
        };
        column_ends[column] = activity.end_epoch_ms();
        ids.push(activity.id.clone());
        column_indices.push(column);
    }

    ColumnAssignment {
        ids,
        column_indices,
        total_columns: column_ends.len(),
    }
}
