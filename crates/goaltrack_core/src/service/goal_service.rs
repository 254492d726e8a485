//! Goal use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::goal::{DailyGoal, FinalGoal, Pillar};
use crate::repo::goal_repo::{GoalRepository, RepoResult};

/// Use-case service wrapper for goal CRUD operations.
pub struct GoalService<R: GoalRepository> {
    repo: R,
}

impl<R: GoalRepository> GoalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a final goal from a title, generating id and timestamp.
    ///
    /// # Contract
    /// - Returns the created record so callers can keep the generated id.
    pub fn create_final_goal(&self, title: impl Into<String>) -> RepoResult<FinalGoal> {
        let goal = FinalGoal::new(title);
        self.repo.add_final_goal(&goal)?;
        Ok(goal)
    }

    /// Creates a daily goal under an existing final goal, generating its id.
    ///
    /// # Contract
    /// - Fails with a validation error when `final_goal_id` is unknown or
    ///   `weight` is out of range.
    pub fn create_daily_goal(
        &self,
        title: impl Into<String>,
        pillar: Pillar,
        weight: u8,
        final_goal_id: impl Into<String>,
    ) -> RepoResult<DailyGoal> {
        let goal = DailyGoal::new(title, pillar, weight, final_goal_id);
        self.repo.add_daily_goal(&goal)?;
        Ok(goal)
    }

    pub fn list_final_goals(&self) -> RepoResult<Vec<FinalGoal>> {
        self.repo.list_final_goals()
    }

    /// Inserts a caller-built final goal. Fails on duplicate ids.
    pub fn add_final_goal(&self, goal: &FinalGoal) -> RepoResult<()> {
        self.repo.add_final_goal(goal)
    }

    /// Upserts a final goal by id.
    pub fn update_final_goal(&self, goal: &FinalGoal) -> RepoResult<()> {
        self.repo.update_final_goal(goal)
    }

    /// Deletes a final goal and its daily goals. Absent ids are a no-op.
    pub fn delete_final_goal(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_final_goal(id)
    }

    pub fn list_daily_goals(&self) -> RepoResult<Vec<DailyGoal>> {
        self.repo.list_daily_goals()
    }

    pub fn list_daily_goals_by_final_goal(
        &self,
        final_goal_id: &str,
    ) -> RepoResult<Vec<DailyGoal>> {
        self.repo.list_daily_goals_by_final_goal(final_goal_id)
    }

    /// Inserts a caller-built daily goal. Fails on duplicate ids.
    pub fn add_daily_goal(&self, goal: &DailyGoal) -> RepoResult<()> {
        self.repo.add_daily_goal(goal)
    }

    /// Upserts a daily goal by id.
    ///
    /// Past validated entries keep their stored score; weight edits only
    /// affect scores computed from now on.
    pub fn update_daily_goal(&self, goal: &DailyGoal) -> RepoResult<()> {
        self.repo.update_daily_goal(goal)
    }

    /// Deletes one daily goal. Absent ids are a no-op.
    pub fn delete_daily_goal(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_daily_goal(id)
    }
}
