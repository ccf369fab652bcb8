use crate::args::StatsArgs;
use crate::commands::{session, today, Out};
use crate::error::{ErrorType, IntoResult};
use crate::stats::{
    category_breakdown, monthly_series, BudgetStats, CategoryTotal, MonthlyEntry, SavingsOverview,
};
use crate::store::Store;
use crate::{validate, Config, Result};
use serde::Serialize;
use std::fmt::Write;

/// The statistics page: totals, spending per category, the monthly trend and savings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub budget: BudgetStats,
    pub categories: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlyEntry>,
    pub savings: SavingsOverview,
}

/// Computes the statistics for the signed-in user. The trend covers `--months` months (default
/// from the config) ending with the month of `--reference-date` (default today).
pub async fn stats(config: &Config, store: &dyn Store, args: StatsArgs) -> Result<Out<StatsReport>> {
    let user = session(store).await?;
    let month_count = args.months.unwrap_or_else(|| config.month_count());
    validate::month_count(month_count).pub_result(ErrorType::Validation)?;
    let transactions = store
        .transactions(&user.id)
        .await
        .pub_result(ErrorType::Store)?;
    let goals = store
        .savings_goals(&user.id)
        .await
        .pub_result(ErrorType::Store)?;

    let reference = args.reference_date.unwrap_or_else(today);
    let report = StatsReport {
        budget: BudgetStats::compute(&transactions),
        categories: category_breakdown(&transactions),
        monthly: monthly_series(&transactions, month_count, reference),
        savings: SavingsOverview::compute(&goals),
    };
    Ok(Out::new(render(&report), report))
}

fn render(report: &StatsReport) -> String {
    let mut s = String::new();
    let b = &report.budget;
    let _ = writeln!(s, "Income:   {:>14}", b.income.to_string());
    let _ = writeln!(s, "Expenses: {:>14}", b.expenses.to_string());
    let _ = writeln!(s, "Balance:  {:>14}", b.balance.to_string());

    if !report.categories.is_empty() {
        let _ = writeln!(s, "Spending by category:");
        for c in &report.categories {
            let _ = writeln!(
                s,
                "  {:<18}{:>14} {:>6.1}%",
                c.info().label,
                c.total.to_string(),
                c.share
            );
        }
    }

    let _ = writeln!(s, "Monthly:");
    for m in &report.monthly {
        let _ = writeln!(
            s,
            "  {:<8}  in {:>12}  out {:>12}  net {:>12}",
            m.label,
            m.income.to_string(),
            m.expenses.to_string(),
            m.net.to_string()
        );
    }

    let sv = &report.savings;
    let _ = write!(
        s,
        "Savings: {} of {} ({:.1}%) across {} goals",
        sv.total_current, sv.total_target, sv.overall_percent, sv.goal_count
    );
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_stats_over_seed_data() {
        let env = TestEnv::new().await;
        let store = env.store();
        let args = StatsArgs {
            months: Some(3),
            reference_date: NaiveDate::from_ymd_opt(2024, 5, 20),
        };
        let out = stats(&env.config(), &store, args).await.unwrap();
        let report = out.structure().unwrap();

        assert_eq!(report.monthly.len(), 3);
        assert_eq!(report.monthly[2].label, "Mai 24");
        assert_eq!(report.budget.balance, report.budget.income - report.budget.expenses);
        assert!(!report.categories.is_empty());
        assert!(out.message().contains("Spending by category"));
    }

    #[tokio::test]
    async fn test_month_count_is_bounded() {
        let env = TestEnv::new().await;
        let store = env.store();
        for months in [0, 121, usize::MAX] {
            let args = StatsArgs {
                months: Some(months),
                reference_date: None,
            };
            let err = stats(&env.config(), &store, args).await.unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Validation);
        }
    }

    #[tokio::test]
    async fn test_month_count_from_config() {
        let env = TestEnv::new().await;
        let store = env.store();
        let args = StatsArgs {
            months: None,
            reference_date: None,
        };
        let out = stats(&env.config(), &store, args).await.unwrap();
        assert_eq!(
            out.structure().unwrap().monthly.len(),
            env.config().month_count()
        );
    }
}
