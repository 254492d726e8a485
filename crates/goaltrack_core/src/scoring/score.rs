//! Weighted daily score derivation.

use crate::model::goal::DailyGoal;
use std::collections::BTreeSet;

/// Computes the weighted completion score in `[0, 100]`.
///
/// `round(100 * completed_weight / total_weight)`, rounded half-up in
/// integer arithmetic so the result is exact. Returns `0` when the goal set
/// carries no weight.
///
/// Completed ids that match no goal contribute nothing; entries keep goal
/// ids by value, so ids of since-deleted goals are expected here.
pub fn weighted_score(goals: &[DailyGoal], completed: &BTreeSet<String>) -> u8 {
    let total_weight: u64 = goals.iter().map(|goal| u64::from(goal.weight)).sum();
    if total_weight == 0 {
        return 0;
    }

    let completed_weight: u64 = goals
        .iter()
        .filter(|goal| completed.contains(&goal.id))
        .map(|goal| u64::from(goal.weight))
        .sum();

    // Half-up rounding of 100 * completed / total.
    let score = (200 * completed_weight + total_weight) / (2 * total_weight);
    score as u8
}
