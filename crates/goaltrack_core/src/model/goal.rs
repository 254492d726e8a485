//! Goal domain model.
//!
//! # Responsibility
//! - Define `FinalGoal` and `DailyGoal` records and their validation rules.
//! - Keep id generation and creation timestamps in one place.
//!
//! # Invariants
//! - `id` is stable and never reused for another goal.
//! - `DailyGoal::weight` stays within `[WEIGHT_MIN, WEIGHT_MAX]`.
//! - Every `DailyGoal` references an existing `FinalGoal` (checked by the
//!   repository, which owns the lookup).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Smallest allowed daily-goal weight.
pub const WEIGHT_MIN: u8 = 1;
/// Largest allowed daily-goal weight.
pub const WEIGHT_MAX: u8 = 5;

/// Life pillar a daily goal contributes to.
///
/// The set is fixed; persisted values outside it are treated as corrupt
/// state by the repository, not as a recoverable input error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Business,
    Structure,
    Corps,
    Vision,
}

/// Long-term objective that daily goals roll up into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalGoal {
    /// Stable id used for daily-goal ownership and cascade deletes.
    pub id: String,
    pub title: String,
    /// Creation time in unix epoch milliseconds.
    pub created_at: i64,
}

/// Recurring daily checklist item, weighted by relative importance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoal {
    pub id: String,
    pub title: String,
    pub pillar: Pillar,
    /// Relative importance in `[1, 5]`; drives the daily score.
    pub weight: u8,
    /// Owning final goal. Deleting that goal deletes this one.
    pub final_goal_id: String,
}

/// Validation failure for goal records.
///
/// Raised at the repository boundary before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTitle,
    WeightOutOfRange(u8),
    /// `final_goal_id` does not reference a stored `FinalGoal`.
    UnknownFinalGoal(String),
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "goal title must not be empty"),
            Self::WeightOutOfRange(weight) => write!(
                f,
                "goal weight {weight} is outside [{WEIGHT_MIN}, {WEIGHT_MAX}]"
            ),
            Self::UnknownFinalGoal(id) => {
                write!(f, "daily goal references unknown final goal `{id}`")
            }
        }
    }
}

impl Error for GoalValidationError {}

impl FinalGoal {
    /// Creates a final goal with a generated stable id and a creation
    /// timestamp taken from the system clock.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, now_epoch_ms())
    }

    /// Creates a final goal with a caller-provided id.
    ///
    /// Used by seeding and import paths where identity already exists.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            created_at,
        }
    }

    /// Checks record-local invariants. Does not touch storage.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        Ok(())
    }
}

impl DailyGoal {
    /// Creates a daily goal with a generated stable id.
    pub fn new(
        title: impl Into<String>,
        pillar: Pillar,
        weight: u8,
        final_goal_id: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, pillar, weight, final_goal_id)
    }

    /// Creates a daily goal with a caller-provided id.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        pillar: Pillar,
        weight: u8,
        final_goal_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            pillar,
            weight,
            final_goal_id: final_goal_id.into(),
        }
    }

    /// Checks record-local invariants. The referential check against
    /// `final_goals` lives in the repository.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if !(WEIGHT_MIN..=WEIGHT_MAX).contains(&self.weight) {
            return Err(GoalValidationError::WeightOutOfRange(self.weight));
        }
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{DailyGoal, FinalGoal, GoalValidationError, Pillar};

    #[test]
    fn new_final_goal_has_unique_id_and_timestamp() {
        let first = FinalGoal::new("ship v1");
        let second = FinalGoal::new("ship v1");
        assert_ne!(first.id, second.id);
        assert!(first.created_at > 0);
    }

    #[test]
    fn empty_title_is_rejected() {
        let goal = FinalGoal::with_id("f1", "   ", 0);
        assert_eq!(goal.validate(), Err(GoalValidationError::EmptyTitle));
    }

    #[test]
    fn weight_bounds_are_enforced() {
        let low = DailyGoal::with_id("d1", "stretch", Pillar::Corps, 0, "f1");
        assert_eq!(
            low.validate(),
            Err(GoalValidationError::WeightOutOfRange(0))
        );

        let high = DailyGoal::with_id("d1", "stretch", Pillar::Corps, 6, "f1");
        assert_eq!(
            high.validate(),
            Err(GoalValidationError::WeightOutOfRange(6))
        );

        let ok = DailyGoal::with_id("d1", "stretch", Pillar::Corps, 5, "f1");
        assert!(ok.validate().is_ok());
    }
}
