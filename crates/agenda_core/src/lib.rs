//! Core layout logic for the agenda (calendar) view.
//! Given one day of possibly overlapping activities, computes side-by-side
//! column geometry and vertical grid placement for each of them.

pub mod layout;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod service;

pub use layout::cluster::{cluster_activities, Cluster};
pub use layout::columns::{assign_columns, ColumnAssignment};
pub use layout::compose::{compose_cluster, PositionedActivity};
pub use layout::grid::{height_fraction, minutes_from_midnight, top_fraction, MINUTES_PER_DAY};
pub use layout::{layout_day, layout_day_with, LayoutOptions, DEFAULT_BASE_Z_INDEX};
pub use logging::{
    default_log_level, flush_logging, init_logging, init_logging_with, logging_status,
    LoggingConfig,
};
pub use model::activity::{
    Activity, ActivityId, ActivityRecord, ActivityValidationError, DEFAULT_DURATION_MINUTES,
};
pub use schedule::day_bucket::bucket_by_day;
pub use service::layout_service::{
    DayLayout, LayoutService, LayoutServiceError, LayoutServiceResult, LAYOUT_CACHE_CAPACITY,
};

/// Minimal health-check API for integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
