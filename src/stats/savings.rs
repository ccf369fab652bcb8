use crate::model::{Amount, SavingsGoal};
use rust_decimal::Decimal;
use serde::Serialize;

/// Derived state of a single savings goal.
///
/// `progress_percent` is the raw ratio and exceeds 100 for overshot goals. Clamp it when drawing a
/// progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProgress {
    pub progress_percent: Decimal,
    pub remaining: Amount,
    pub is_completed: bool,
}

impl SavingsProgress {
    pub fn compute(goal: &SavingsGoal) -> Self {
        Self {
            progress_percent: goal.current_amount.percent_of(goal.target_amount),
            remaining: (goal.target_amount - goal.current_amount).at_least_zero(),
            is_completed: goal.current_amount >= goal.target_amount,
        }
    }

    /// The percent limited to `0..=100`.
    pub fn display_percent(&self) -> Decimal {
        self.progress_percent
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}

/// The goal's new current amount after adding `delta`, which is negative for a withdrawal.
///
/// Withdrawing more than is saved settles at zero. There is no upper bound.
pub fn apply_delta(goal: &SavingsGoal, delta: Amount) -> Amount {
    (goal.current_amount + delta).at_least_zero()
}

/// Totals across all of a user's goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsOverview {
    pub goal_count: usize,
    pub completed_count: usize,
    pub total_target: Amount,
    pub total_current: Amount,
    /// `total_current / total_target * 100`, 0 without any target.
    pub overall_percent: Decimal,
}

impl SavingsOverview {
    pub fn compute(goals: &[SavingsGoal]) -> Self {
        let total_target: Amount = goals.iter().map(|g| g.target_amount).sum();
        let total_current: Amount = goals.iter().map(|g| g.current_amount).sum();
        Self {
            goal_count: goals.len(),
            completed_count: goals
                .iter()
                .filter(|g| SavingsProgress::compute(g).is_completed)
                .count(),
            total_target,
            total_current,
            overall_percent: total_current.percent_of(total_target),
        }
    }
}
