//! Savings goal command handlers.

use crate::args::{AddGoalArgs, GoalChangeArgs, UpdateGoalArgs};
use crate::commands::{plural, session, Out};
use crate::error::{Error, ErrorType, IntoResult};
use crate::model::{Amount, SavingsGoal, SavingsGoalDraft};
use crate::stats::{apply_delta, SavingsOverview, SavingsProgress};
use crate::store::Store;
use crate::{validate, Result};
use anyhow::anyhow;
use serde::Serialize;

/// A goal together with its derived progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatus {
    pub goal: SavingsGoal,
    pub progress: SavingsProgress,
}

impl GoalStatus {
    fn new(goal: SavingsGoal) -> Self {
        let progress = SavingsProgress::compute(&goal);
        Self { goal, progress }
    }

    fn line(&self) -> String {
        let done = if self.progress.is_completed {
            "  done"
        } else {
            ""
        };
        format!(
            "{}: {} of {} ({:.0}%), {} to go{done}  [{}]",
            self.goal.name,
            self.goal.current_amount,
            self.goal.target_amount,
            self.progress.progress_percent,
            self.progress.remaining,
            self.goal.id
        )
    }
}

pub async fn add_goal(store: &mut dyn Store, args: AddGoalArgs) -> Result<Out<GoalStatus>> {
    let user = session(store).await?;
    let draft = SavingsGoalDraft {
        name: args.name,
        target_amount: args.target,
        current_amount: args.current,
        target_date: args.target_date,
    };
    validate::savings_goal(&draft).pub_result(ErrorType::Validation)?;
    let goal = store
        .create_savings_goal(&user.id, draft)
        .await
        .pub_result(ErrorType::Store)?;
    let status = GoalStatus::new(goal);
    Ok(Out::new(format!("Added goal {}", status.line()), status))
}

/// Replaces every field of an existing goal, including the saved amount.
pub async fn update_goal(store: &mut dyn Store, args: UpdateGoalArgs) -> Result<Out<GoalStatus>> {
    let user = session(store).await?;
    let draft = SavingsGoalDraft {
        name: args.name,
        target_amount: args.target,
        current_amount: args.current,
        target_date: args.target_date,
    };
    validate::savings_goal(&draft).pub_result(ErrorType::Validation)?;
    let goal = store
        .update_savings_goal(&user.id, &args.id, draft)
        .await
        .pub_result(ErrorType::Store)?;
    let status = GoalStatus::new(goal);
    Ok(Out::new(format!("Updated goal {}", status.line()), status))
}

/// Adds `args.amount` to the goal.
pub async fn deposit(store: &mut dyn Store, args: GoalChangeArgs) -> Result<Out<GoalStatus>> {
    change(store, &args.id, args.amount, Direction::Deposit).await
}

/// Takes `args.amount` out of the goal. Taking out more than is saved leaves zero.
pub async fn withdraw(store: &mut dyn Store, args: GoalChangeArgs) -> Result<Out<GoalStatus>> {
    change(store, &args.id, args.amount, Direction::Withdraw).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Deposit,
    Withdraw,
}

/// `amount` is what the user entered and must be positive; `direction` decides the sign.
async fn change(
    store: &mut dyn Store,
    id: &str,
    amount: Amount,
    direction: Direction,
) -> Result<Out<GoalStatus>> {
    let user = session(store).await?;
    validate::savings_change(amount).pub_result(ErrorType::Validation)?;

    let goal = store
        .savings_goals(&user.id)
        .await
        .pub_result(ErrorType::Store)?
        .into_iter()
        .find(|g| g.id == id)
        .ok_or_else(|| Error::new(ErrorType::Store, anyhow!("Savings goal '{id}' not found")))?;

    let (delta, verb) = match direction {
        Direction::Deposit => (amount, "Deposited"),
        Direction::Withdraw => (-amount, "Withdrew"),
    };
    let next = apply_delta(&goal, delta);
    let goal = store
        .set_savings_amount(&user.id, id, next)
        .await
        .pub_result(ErrorType::Store)?;
    let status = GoalStatus::new(goal);
    Ok(Out::new(
        format!("{verb} {amount}, {}", status.line()),
        status,
    ))
}

pub async fn delete_goal(store: &mut dyn Store, id: &str) -> Result<Out<()>> {
    let user = session(store).await?;
    store
        .delete_savings_goal(&user.id, id)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(format!("Deleted savings goal {id}").into())
}

pub async fn list_goals(store: &dyn Store) -> Result<Out<Vec<GoalStatus>>> {
    let user = session(store).await?;
    let goals = store
        .savings_goals(&user.id)
        .await
        .pub_result(ErrorType::Store)?;
    let overview = SavingsOverview::compute(&goals);
    let statuses: Vec<GoalStatus> = goals.into_iter().map(GoalStatus::new).collect();

    let mut message = format!(
        "{}, {} of {} saved ({:.0}%)",
        plural(statuses.len(), "goal", "goals"),
        overview.total_current,
        overview.total_target,
        overview.overall_percent
    );
    for s in &statuses {
        message.push_str("\n  ");
        message.push_str(&s.line());
    }
    Ok(Out::new(message, statuses))
}
