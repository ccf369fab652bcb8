use crate::model::{Amount, CategoryInfo, ExpenseCategory, IncomeSource, Taxonomy};
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a transaction brings money in or takes it out.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single income or expense booking.
///
/// `category` holds the code exactly as stored. Which taxonomy it belongs to depends on
/// `transaction_type`; use `expense_category` or `income_source` to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// The expense category, or `None` for income. Unknown codes map to `Other`.
    pub fn expense_category(&self) -> Option<ExpenseCategory> {
        self.is_expense()
            .then(|| ExpenseCategory::from_code(&self.category))
    }

    /// The income source, or `None` for expenses. Unknown codes map to `Other`.
    pub fn income_source(&self) -> Option<IncomeSource> {
        self.is_income()
            .then(|| IncomeSource::from_code(&self.category))
    }

    /// Display metadata from the registry matching this transaction's type.
    pub fn category_info(&self) -> &'static CategoryInfo {
        match self.transaction_type {
            TransactionType::Income => IncomeSource::from_code(&self.category).info(),
            TransactionType::Expense => ExpenseCategory::from_code(&self.category).info(),
        }
    }
}

/// The user-editable fields of a transaction, used for create and full-field update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub(crate) fn into_transaction(
        self,
        id: String,
        user_id: String,
        now: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id,
            user_id,
            transaction_type: self.transaction_type,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Returns the `limit` most recent transactions, newest date first. Transactions on the same date
/// keep the order in which they were created, newest first.
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn tx(kind: TransactionType, category: &str, date: &str) -> Transaction {
        let now = Utc::now();
        TransactionDraft {
            transaction_type: kind,
            amount: Amount::from_str("10").unwrap(),
            category: category.to_string(),
            description: "x".to_string(),
            date: NaiveDate::from_str(date).unwrap(),
        }
        .into_transaction(date.to_string(), "u1".to_string(), now)
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "t1",
            "userId": "u1",
            "type": "expense",
            "amount": "300.00",
            "category": "food",
            "description": "Wocheneinkauf",
            "date": "2024-03-31",
            "createdAt": "2024-03-31T18:00:00Z",
            "updatedAt": "2024-03-31T18:00:00Z"
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert!(t.is_expense());
        assert_eq!(t.expense_category(), Some(ExpenseCategory::Food));
        assert_eq!(t.income_source(), None);
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_category_info_uses_matching_registry() {
        let income = tx(TransactionType::Income, "salary", "2024-01-01");
        assert_eq!(income.category_info().label, "Gehalt");
        let expense = tx(TransactionType::Expense, "salary", "2024-01-01");
        assert_eq!(expense.category_info().code, "other");
    }

    #[test]
    fn test_stale_code_is_preserved_but_reads_as_other() {
        let t = tx(TransactionType::Expense, "groceries", "2024-01-01");
        assert_eq!(t.category, "groceries");
        assert_eq!(t.expense_category(), Some(ExpenseCategory::Other));
    }

    #[test]
    fn test_recent_sorts_newest_first_and_limits() {
        let list = vec![
            tx(TransactionType::Expense, "food", "2024-01-03"),
            tx(TransactionType::Expense, "food", "2024-01-09"),
            tx(TransactionType::Expense, "food", "2024-01-01"),
        ];
        let ids: Vec<&str> = recent(&list, 2).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2024-01-09", "2024-01-03"]);
    }
}
