use crate::model::Amount;
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A savings target and how much has been put aside for it so far.
///
/// `current_amount` may exceed `target_amount`; that is how a completed goal looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: Amount,
    pub current_amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable fields of a savings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalDraft {
    pub name: String,
    pub target_amount: Amount,
    #[serde(default)]
    pub current_amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

impl SavingsGoalDraft {
    pub(crate) fn into_goal(self, id: String, user_id: String, now: DateTime<Utc>) -> SavingsGoal {
        SavingsGoal {
            id,
            user_id,
            name: self.name,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            target_date: self.target_date,
            created_at: now,
            updated_at: now,
        }
    }
}
