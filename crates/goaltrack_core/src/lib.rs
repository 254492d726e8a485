//! Core domain logic for goaltrack.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod scoring;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::DailyEntry;
pub use model::goal::{
    DailyGoal, FinalGoal, GoalValidationError, Pillar, WEIGHT_MAX, WEIGHT_MIN,
};
pub use repo::entry_repo::{EntryRepository, SqliteEntryRepository};
pub use repo::goal_repo::{GoalRepository, RepoError, RepoResult, SqliteGoalRepository};
pub use scoring::{
    best_day, calendar_scores, rolling_average, streak, weighted_score, STREAK_TARGET_SCORE,
};
pub use service::day_service::{DayError, DayResult, DayService};
pub use service::goal_service::GoalService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
