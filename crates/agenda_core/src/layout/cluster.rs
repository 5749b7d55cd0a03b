//! Overlap clustering for one day of activities.
//!
//! # Responsibility
//! - Partition a day's activities into maximal chain-overlapping runs.
//!
//! # Invariants
//! - Members are sorted ascending by start; ties keep input order.
//! - Members overlap by chain transitivity, not necessarily pairwise.
//! - An activity starting exactly at `cluster_end` opens a new cluster.

use crate::model::activity::Activity;

/// Maximal run of start-sorted activities linked by overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    activities: Vec<Activity>,
    end_epoch_ms: i64,
}

impl Cluster {
    fn open(activity: Activity) -> Self {
        let end_epoch_ms = activity.end_epoch_ms();
        Self {
            activities: vec![activity],
            end_epoch_ms,
        }
    }

    fn push(&mut self, activity: Activity) {
        self.end_epoch_ms = self.end_epoch_ms.max(activity.end_epoch_ms());
        self.activities.push(activity);
    }

    /// Members in start order, with durations already normalized.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Running maximum of member end instants (epoch milliseconds).
    pub fn end_epoch_ms(&self) -> i64 {
        self.end_epoch_ms
    }

    /// Largest number of members active at one instant.
    ///
    /// Ends are processed before starts at equal instants, so touching
    /// intervals are never counted together.
    pub fn peak_concurrency(&self) -> usize {
        let mut edges: Vec<(i64, i8)> = Vec::with_capacity(self.activities.len() * 2);
        for activity in &self.activities {
            edges.push((activity.start_epoch_ms(), 1));
            edges.push((activity.end_epoch_ms(), -1));
        }
        edges.sort_unstable();

        let mut active: i64 = 0;
        let mut peak: i64 = 0;
        for (_, delta) in edges {
            active += i64::from(delta);
            peak = peak.max(active);
        }
        peak as usize
    }
}

/// Groups activities of a single day into overlap clusters.
///
/// Durations are normalized before clustering and the normalized copies are
/// what the clusters hold. Empty input yields no clusters.
pub fn cluster_activities(activities: &[Activity]) -> Vec<Cluster> {
    let mut sorted: Vec<Activity> = activities.iter().map(Activity::normalized).collect();
    sorted.sort_by_key(|activity| activity.start_time);

    let mut clusters = Vec::new();
    let mut current: Option<Cluster> = None;
    for activity in sorted {
        match current.as_mut() {
            Some(cluster) if activity.start_epoch_ms() < cluster.end_epoch_ms => {
                cluster.push(activity);
            }
            _ => {
                if let Some(done) = current.replace(Cluster::open(activity)) {
                    clusters.push(done);
                }
            }
        }
    }
    clusters.extend(current);
    clusters
}
