use crate::args::SummaryArgs;
use crate::commands::{session, today, Out};
use crate::error::{ErrorType, IntoResult};
use crate::filter::{EventFilter, RecipeFilter};
use crate::stats::{DashboardSummary, UserData};
use crate::store::Store;
use crate::Result;
use std::fmt::Write;

/// The dashboard: balance, savings, recent transactions, today's and upcoming events, and counts
/// for recipes and the shopping list.
pub async fn summary(store: &dyn Store, args: SummaryArgs) -> Result<Out<DashboardSummary>> {
    let user = session(store).await?;
    let id = user.id.as_str();
    let transactions = store.transactions(id).await.pub_result(ErrorType::Store)?;
    let goals = store.savings_goals(id).await.pub_result(ErrorType::Store)?;
    let events = store
        .events(id, &EventFilter::default())
        .await
        .pub_result(ErrorType::Store)?;
    let recipes = store
        .recipes(id, &RecipeFilter::default())
        .await
        .pub_result(ErrorType::Store)?;
    let shopping_list = store.shopping_list(id).await.pub_result(ErrorType::Store)?;

    let day = args.today.unwrap_or_else(today);
    let summary = DashboardSummary::compute(
        UserData {
            transactions: &transactions,
            goals: &goals,
            events: &events,
            recipes: &recipes,
            shopping_list: &shopping_list,
        },
        day,
    );
    Ok(Out::new(render(&summary), summary))
}

fn render(s: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Balance {} (income {}, expenses {})",
        s.budget.balance, s.budget.income, s.budget.expenses
    );
    let _ = writeln!(
        out,
        "Savings {} of {} ({:.0}%), {} of {} goals reached",
        s.savings.total_current,
        s.savings.total_target,
        s.savings.overall_percent,
        s.savings.completed_count,
        s.savings.goal_count
    );
    let _ = writeln!(out, "Events today: {}", s.events_today);
    for e in &s.upcoming_events {
        let _ = writeln!(out, "  {}  {}", e.start_date.format("%Y-%m-%d %H:%M"), e.title);
    }
    let _ = writeln!(out, "Recent transactions:");
    for t in &s.recent_transactions {
        let sign = if t.is_income() { '+' } else { '-' };
        let _ = writeln!(
            out,
            "  {}  {sign}{}  {}",
            t.date,
            t.amount,
            t.category_info().label
        );
    }
    let _ = write!(
        out,
        "Recipes: {} ({} favorites), shopping list: {} open",
        s.recipe_count, s.favorite_count, s.open_shopping_items
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_summary_over_seed_data() {
        let env = TestEnv::new().await;
        let store = env.store();
        let args = SummaryArgs {
            today: NaiveDate::from_ymd_opt(2024, 4, 10),
        };
        let out = summary(&store, args).await.unwrap();
        let s = out.structure().unwrap();
        assert!(!s.recent_transactions.is_empty());
        assert!(s.recent_transactions.len() <= 10);
        assert_eq!(s.events_today, 1);
        assert!(s.recipe_count >= 2);
        assert!(out.message().contains("Events today: 1"));
    }

    #[tokio::test]
    async fn test_summary_needs_session() {
        let env = TestEnv::signed_out().await;
        let err = summary(&env.store(), SummaryArgs { today: None })
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Session);
    }
}
