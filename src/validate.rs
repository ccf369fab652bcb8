//! Checks applied to user-entered records before they are handed to a store. The statistics in
//! `crate::stats` assume records that passed these checks.

use crate::error::Res;
use crate::model::{
    Amount, EventDraft, ExpenseCategory, IncomeSource, SavingsGoalDraft, Taxonomy,
    TransactionDraft, TransactionType,
};
use anyhow::{bail, ensure};
use rust_decimal::Decimal;

const MAX_TRANSACTION_AMOUNT: i64 = 1_000_000;
const MAX_GOAL_AMOUNT: i64 = 10_000_000;

const MAX_DESCRIPTION_CHARS: usize = 500;
const MAX_GOAL_NAME_CHARS: usize = 100;
const MAX_EVENT_TITLE_CHARS: usize = 200;
const MAX_EVENT_DESCRIPTION_CHARS: usize = 1000;
const MAX_LOCATION_CHARS: usize = 200;

/// Longest monthly trend the statistics will build, ten years.
pub const MAX_MONTH_COUNT: usize = 120;

fn limit(value: i64) -> Amount {
    Amount::new(Decimal::from(value))
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

fn required_text(field: &str, value: &str, max: usize) -> Res<()> {
    ensure!(!value.trim().is_empty(), "{field} is required");
    ensure!(
        char_count(value) <= max,
        "{field} is too long ({} characters, at most {max} allowed)",
        char_count(value)
    );
    Ok(())
}

fn optional_text(field: &str, value: Option<&str>, max: usize) -> Res<()> {
    if let Some(value) = value {
        ensure!(
            char_count(value) <= max,
            "{field} is too long ({} characters, at most {max} allowed)",
            char_count(value)
        );
    }
    Ok(())
}

pub fn transaction(draft: &TransactionDraft) -> Res<()> {
    ensure!(
        draft.amount.is_positive(),
        "Amount must be greater than 0, got {}",
        draft.amount
    );
    ensure!(
        draft.amount <= limit(MAX_TRANSACTION_AMOUNT),
        "Amount {} is too high",
        draft.amount
    );
    required_text("Description", &draft.description, MAX_DESCRIPTION_CHARS)?;

    let valid = match draft.transaction_type {
        TransactionType::Expense => ExpenseCategory::parse_code(&draft.category).is_some(),
        TransactionType::Income => IncomeSource::parse_code(&draft.category).is_some(),
    };
    if !valid {
        let codes: Vec<&str> = match draft.transaction_type {
            TransactionType::Expense => ExpenseCategory::ALL.iter().map(|c| c.code()).collect(),
            TransactionType::Income => IncomeSource::ALL.iter().map(|c| c.code()).collect(),
        };
        bail!(
            "'{}' is not a valid {} category, expected one of: {}",
            draft.category,
            draft.transaction_type,
            codes.join(", ")
        );
    }
    Ok(())
}

pub fn savings_goal(draft: &SavingsGoalDraft) -> Res<()> {
    required_text("Name", &draft.name, MAX_GOAL_NAME_CHARS)?;
    ensure!(
        draft.target_amount.is_positive(),
        "Target amount must be greater than 0"
    );
    ensure!(
        draft.target_amount <= limit(MAX_GOAL_AMOUNT),
        "Target amount {} is too high",
        draft.target_amount
    );
    ensure!(
        !draft.current_amount.is_negative(),
        "Current amount cannot be negative"
    );
    ensure!(
        draft.current_amount <= limit(MAX_GOAL_AMOUNT),
        "Current amount {} is too high",
        draft.current_amount
    );
    Ok(())
}

/// A deposit into or withdrawal from a savings goal. The direction is chosen by the caller, so the
/// amount itself must be positive.
pub fn savings_change(amount: Amount) -> Res<()> {
    ensure!(
        amount.is_positive(),
        "Amount must be greater than 0, got {amount}"
    );
    Ok(())
}

/// Length of the monthly trend, from `--months` or `config.json`.
pub fn month_count(count: usize) -> Res<()> {
    ensure!(
        (1..=MAX_MONTH_COUNT).contains(&count),
        "Month count must be between 1 and {MAX_MONTH_COUNT}, got {count}"
    );
    Ok(())
}

pub fn event(draft: &EventDraft) -> Res<()> {
    required_text("Title", &draft.title, MAX_EVENT_TITLE_CHARS)?;
    optional_text(
        "Description",
        draft.description.as_deref(),
        MAX_EVENT_DESCRIPTION_CHARS,
    )?;
    optional_text("Location", draft.location.as_deref(), MAX_LOCATION_CHARS)?;
    ensure!(
        draft.end_date >= draft.start_date,
        "End {} must not be before start {}",
        draft.end_date,
        draft.start_date
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventCategory;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn tx(kind: TransactionType, amount: &str, category: &str, description: &str) -> TransactionDraft {
        TransactionDraft {
            transaction_type: kind,
            amount: amt(amount),
            category: category.to_string(),
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn goal(name: &str, target: &str, current: &str) -> SavingsGoalDraft {
        SavingsGoalDraft {
            name: name.to_string(),
            target_amount: amt(target),
            current_amount: amt(current),
            target_date: None,
        }
    }

    fn event_draft(start: &str, end: &str) -> EventDraft {
        EventDraft {
            title: "Klausur".to_string(),
            description: None,
            category: EventCategory::Uni,
            start_date: NaiveDateTime::from_str(start).unwrap(),
            end_date: NaiveDateTime::from_str(end).unwrap(),
            location: None,
            reminder: Default::default(),
            is_all_day: false,
            recurring: None,
        }
    }

    #[test]
    fn test_valid_transaction() {
        transaction(&tx(TransactionType::Expense, "12.50", "food", "Mensa")).unwrap();
        transaction(&tx(TransactionType::Income, "1000000", "salary", "Lohn")).unwrap();
        transaction(&tx(TransactionType::Income, "5", "other", "Fund")).unwrap();
    }

    #[test]
    fn test_transaction_amount_bounds() {
        assert!(transaction(&tx(TransactionType::Expense, "0", "food", "x")).is_err());
        assert!(transaction(&tx(TransactionType::Expense, "-1", "food", "x")).is_err());
        assert!(transaction(&tx(TransactionType::Expense, "1000000.01", "food", "x")).is_err());
    }

    #[test]
    fn test_transaction_description() {
        assert!(transaction(&tx(TransactionType::Expense, "1", "food", "")).is_err());
        assert!(transaction(&tx(TransactionType::Expense, "1", "food", "   ")).is_err());
        let long = "ä".repeat(500);
        transaction(&tx(TransactionType::Expense, "1", "food", &long)).unwrap();
        let too_long = "a".repeat(501);
        assert!(transaction(&tx(TransactionType::Expense, "1", "food", &too_long)).is_err());
    }

    #[test]
    fn test_transaction_category_must_match_type() {
        let err = transaction(&tx(TransactionType::Income, "1", "food", "x")).unwrap_err();
        assert!(err.to_string().contains("income"));
        assert!(transaction(&tx(TransactionType::Expense, "1", "salary", "x")).is_err());
        assert!(transaction(&tx(TransactionType::Expense, "1", "groceries", "x")).is_err());
    }

    #[test]
    fn test_savings_goal() {
        savings_goal(&goal("Urlaub", "1500", "0")).unwrap();
        savings_goal(&goal("Urlaub", "1500", "2000")).unwrap();
        assert!(savings_goal(&goal("", "1500", "0")).is_err());
        assert!(savings_goal(&goal("Urlaub", "0", "0")).is_err());
        assert!(savings_goal(&goal("Urlaub", "10000000.01", "0")).is_err());
        assert!(savings_goal(&goal("Urlaub", "100", "-1")).is_err());
        assert!(savings_goal(&goal(&"n".repeat(101), "100", "0")).is_err());
    }

    #[test]
    fn test_month_count() {
        month_count(1).unwrap();
        month_count(MAX_MONTH_COUNT).unwrap();
        assert!(month_count(0).is_err());
        assert!(month_count(MAX_MONTH_COUNT + 1).is_err());
        assert!(month_count(usize::MAX).is_err());
    }

    #[test]
    fn test_savings_change() {
        savings_change(amt("0.01")).unwrap();
        assert!(savings_change(Amount::ZERO).is_err());
        assert!(savings_change(amt("-3")).is_err());
    }

    #[test]
    fn test_event() {
        event(&event_draft("2024-04-02T10:00:00", "2024-04-02T10:00:00")).unwrap();
        assert!(event(&event_draft("2024-04-02T10:00:00", "2024-04-02T09:59:00")).is_err());

        let mut draft = event_draft("2024-04-02T10:00:00", "2024-04-02T12:00:00");
        draft.location = Some("x".repeat(201));
        assert!(event(&draft).is_err());
        draft.location = None;
        draft.description = Some("x".repeat(1001));
        assert!(event(&draft).is_err());
        draft.description = Some(String::new());
        event(&draft).unwrap();
    }
}
