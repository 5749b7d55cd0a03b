//! Date-range helpers around the per-day layout engine.
//!
//! # Responsibility
//! - Split a multi-day activity snapshot into single-day inputs.
//!
//! # Invariants
//! - Day membership is decided by the start instant only.

pub mod day_bucket;
