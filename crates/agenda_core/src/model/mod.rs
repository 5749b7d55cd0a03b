//! Domain model consumed by the agenda layout engine.
//!
//! # Responsibility
//! - Define the activity record shared by the engine and its callers.
//! - Keep wire decoding next to the type it produces.
//!
//! # Invariants
//! - Every activity carries a parsed instant and an opaque caller-owned id.
//! - Domain fields (subject, contact, agent) never enter this crate.

pub mod activity;
