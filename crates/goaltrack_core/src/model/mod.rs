//! Domain model for goals and daily entries.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one storage shape per entity, shared by all callers.
//!
//! # Invariants
//! - Every goal is identified by a stable string id.
//! - A daily entry is identified by its calendar date; at most one per date.

pub mod entry;
pub mod goal;
