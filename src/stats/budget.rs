use crate::model::{Amount, CategoryInfo, ExpenseCategory, Taxonomy, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Income, expenses and what is left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStats {
    pub income: Amount,
    pub expenses: Amount,
    /// `income - expenses`, negative when overspent.
    pub balance: Amount,
}

impl BudgetStats {
    /// Sums income and expense amounts. An empty list gives all zeros.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut income = Amount::ZERO;
        let mut expenses = Amount::ZERO;
        for t in transactions {
            if t.is_income() {
                income += t.amount;
            } else {
                expenses += t.amount;
            }
        }
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

/// Total spent in one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Amount,
    /// Share of all expenses, in percent.
    pub share: Decimal,
}

impl CategoryTotal {
    pub fn info(&self) -> &'static CategoryInfo {
        self.category.info()
    }
}

/// Totals expense transactions per category.
///
/// Income is ignored and categories without expenses are left out. Codes that are not in the
/// registry are counted under `other`. The result is ordered by total, largest first, with ties
/// ordered by category code.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<ExpenseCategory, Amount> = BTreeMap::new();
    for t in transactions {
        if let Some(category) = t.expense_category() {
            *totals.entry(category).or_default() += t.amount;
        }
    }

    let all: Amount = totals.values().sum();
    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total,
            share: total.percent_of(all),
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.code().cmp(b.category.code()))
    });
    breakdown
}
