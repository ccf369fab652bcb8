use crate::model::{Amount, Transaction};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// The number of months shown in the income/expense trend by default.
pub const DEFAULT_MONTH_COUNT: usize = 6;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sep.", "Okt.", "Nov.", "Dez.",
];

/// Income and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    pub year: i32,
    /// 1 through 12.
    pub month: u32,
    /// Short label for chart axes, e.g. `März 24`.
    pub label: String,
    pub income: Amount,
    pub expenses: Amount,
    /// `income - expenses`.
    pub net: Amount,
}

/// Builds a fixed-length, oldest-first series of the `month_count` calendar months ending with the
/// month that contains `reference`.
///
/// Every month is present even when it has no transactions. Transactions outside the window are
/// ignored. A transaction belongs to the month of its calendar `date`; dates carry no time zone, so
/// a booking on the last day of a month always stays in that month.
pub fn monthly_series(
    transactions: &[Transaction],
    month_count: usize,
    reference: NaiveDate,
) -> Vec<MonthlyEntry> {
    let last = month_index(reference);
    let first = last - month_count as i64 + 1;

    let mut entries: Vec<MonthlyEntry> = (first..=last).map(empty_entry).collect();

    for t in transactions {
        let ix = month_index(t.date);
        if ix < first || ix > last {
            continue;
        }
        let entry = &mut entries[(ix - first) as usize];
        if t.is_income() {
            entry.income += t.amount;
        } else {
            entry.expenses += t.amount;
        }
    }

    for entry in &mut entries {
        entry.net = entry.income - entry.expenses;
    }
    entries
}

/// Months since year 0, so that consecutive months differ by one across year boundaries.
fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn empty_entry(index: i64) -> MonthlyEntry {
    let year = index.div_euclid(12) as i32;
    let month0 = index.rem_euclid(12) as usize;
    MonthlyEntry {
        year,
        month: month0 as u32 + 1,
        label: format!(
            "{} {:02}",
            MONTH_ABBREVIATIONS[month0],
            year.rem_euclid(100)
        ),
        income: Amount::ZERO,
        expenses: Amount::ZERO,
        net: Amount::ZERO,
    }
}
