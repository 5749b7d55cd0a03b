//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, day bucketing and layout into use-case APIs.
//! - Keep callers decoupled from the engine's internal pipeline.

pub mod layout_service;
