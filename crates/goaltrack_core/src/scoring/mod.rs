//! Pure scoring and history aggregation.
//!
//! # Responsibility
//! - Derive the weighted daily score from a goal set and completion set.
//! - Derive streaks and window aggregates from stored entry history.
//!
//! # Invariants
//! - No I/O: every function is deterministic over its inputs.
//! - Aggregates only ever consider validated entries.

pub mod insights;
pub mod score;

pub use insights::{best_day, calendar_scores, rolling_average, streak, STREAK_TARGET_SCORE};
pub use score::weighted_score;
