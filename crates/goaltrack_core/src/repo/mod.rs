//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce record validation before persistence,
//!   including the daily-goal -> final-goal referential check.
//! - Repository APIs return semantic errors (`Duplicate`, `Validation`) in
//!   addition to DB transport errors.

pub mod entry_repo;
pub mod goal_repo;
