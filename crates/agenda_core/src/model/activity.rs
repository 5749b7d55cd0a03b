//! Activity domain model.
//!
//! # Responsibility
//! - Define the minimal record the layout engine consumes.
//! - Decode wire records and reject malformed timestamps at the boundary.
//!
//! # Invariants
//! - `start_time` is always a parsed instant; the engine never sees raw text.
//! - A missing or non-positive duration is treated as 60 minutes.
//! - Intervals are half-open: `[start, start + duration)`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Duration applied when an activity has no usable duration.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Opaque identifier used by callers to correlate layout output with their
/// own domain records (subject, contact, responsible agent).
pub type ActivityId = String;

/// Validation errors for activity decoding and invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityValidationError {
    EmptyId,
    InvalidStartTime {
        id: ActivityId,
        value: String,
        message: String,
    },
    NegativeDuration {
        id: ActivityId,
        minutes: i64,
    },
}

impl Display for ActivityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "activity id cannot be empty"),
            Self::InvalidStartTime { id, value, message } => write!(
                f,
                "activity `{id}` has invalid startTime `{value}`: {message}"
            ),
            Self::NegativeDuration { id, minutes } => write!(
                f,
                "activity `{id}` has negative durationMinutes ({minutes})"
            ),
        }
    }
}

impl Error for ActivityValidationError {}

/// Wire shape of one activity as delivered by the data-fetching layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    /// ISO-8601 / RFC 3339 instant, e.g. `2024-05-02T09:00:00-03:00`.
    pub start_time: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

/// One time-stamped activity placed on the agenda grid.
///
/// Deserialization goes through [`ActivityRecord`] so invalid timestamps are
/// rejected instead of reaching the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ActivityRecord")]
pub struct Activity {
    pub id: ActivityId,
    /// Wall clock is read in this timestamp's own offset; no zone conversion.
    pub start_time: DateTime<FixedOffset>,
    pub duration_minutes: Option<i64>,
}

impl Activity {
    /// Creates an activity with no explicit duration.
    pub fn new(id: impl Into<ActivityId>, start_time: DateTime<FixedOffset>) -> Self {
        Self {
            id: id.into(),
            start_time,
            duration_minutes: None,
        }
    }

    /// Returns this activity with an explicit duration in minutes.
    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Duration used for layout: the stored value when positive, otherwise
    /// [`DEFAULT_DURATION_MINUTES`].
    pub fn effective_duration_minutes(&self) -> i64 {
        match self.duration_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => DEFAULT_DURATION_MINUTES,
        }
    }

    /// Start instant as Unix epoch milliseconds.
    pub fn start_epoch_ms(&self) -> i64 {
        self.start_time.timestamp_millis()
    }

    /// Exclusive end instant as Unix epoch milliseconds.
    pub fn end_epoch_ms(&self) -> i64 {
        self.start_epoch_ms().saturating_add(
            self.effective_duration_minutes()
                .saturating_mul(MILLIS_PER_MINUTE),
        )
    }

    /// Half-open overlap test. Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Activity) -> bool {
        self.start_epoch_ms() < other.end_epoch_ms() && other.start_epoch_ms() < self.end_epoch_ms()
    }

    /// Returns a copy whose duration is replaced by the effective duration.
    pub fn normalized(&self) -> Self {
        Self {
            id: self.id.clone(),
            start_time: self.start_time,
            duration_minutes: Some(self.effective_duration_minutes()),
        }
    }

    /// Validates identity and duration invariants.
    ///
    /// Zero and missing durations are accepted; they fall back to the default
    /// at layout time.
    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        if self.id.trim().is_empty() {
            return Err(ActivityValidationError::EmptyId);
        }
        if let Some(minutes) = self.duration_minutes {
            if minutes < 0 {
                return Err(ActivityValidationError::NegativeDuration {
                    id: self.id.clone(),
                    minutes,
                });
            }
        }
        Ok(())
    }
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = ActivityValidationError;

    fn try_from(record: ActivityRecord) -> Result<Self, Self::Error> {
        let start_time = DateTime::parse_from_rfc3339(record.start_time.trim()).map_err(|err| {
            ActivityValidationError::InvalidStartTime {
                id: record.id.clone(),
                value: record.start_time.clone(),
                message: err.to_string(),
            }
        })?;
        let activity = Self {
            id: record.id,
            start_time,
            duration_minutes: record.duration_minutes,
        };
        activity.validate()?;
        Ok(activity)
    }
}

impl From<&Activity> for ActivityRecord {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            start_time: activity.start_time.to_rfc3339(),
            duration_minutes: activity.duration_minutes,
        }
    }
}

impl From<Activity> for ActivityRecord {
    fn from(activity: Activity) -> Self {
        Self::from(&activity)
    }
}
