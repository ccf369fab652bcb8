use crate::model::{recent, CalendarEvent, Recipe, SavingsGoal, ShoppingListItem, Transaction};
use crate::stats::agenda::{events_on, upcoming, DEFAULT_UPCOMING};
use crate::stats::budget::BudgetStats;
use crate::stats::savings::SavingsOverview;
use chrono::NaiveDate;
use serde::Serialize;

/// How many transactions the dashboard lists.
pub const DEFAULT_RECENT: usize = 10;

/// Everything the dashboard shows at a glance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub budget: BudgetStats,
    pub savings: SavingsOverview,
    pub recent_transactions: Vec<Transaction>,
    pub events_today: usize,
    pub upcoming_events: Vec<CalendarEvent>,
    pub recipe_count: usize,
    pub favorite_count: usize,
    pub open_shopping_items: usize,
}

/// The lists one user sees, as fetched from the store.
#[derive(Debug, Clone, Copy)]
pub struct UserData<'a> {
    pub transactions: &'a [Transaction],
    pub goals: &'a [SavingsGoal],
    pub events: &'a [CalendarEvent],
    /// Recipes with `is_favorite` filled in for the user.
    pub recipes: &'a [Recipe],
    pub shopping_list: &'a [ShoppingListItem],
}

impl DashboardSummary {
    pub fn compute(data: UserData<'_>, today: NaiveDate) -> Self {
        Self {
            budget: BudgetStats::compute(data.transactions),
            savings: SavingsOverview::compute(data.goals),
            recent_transactions: recent(data.transactions, DEFAULT_RECENT)
                .into_iter()
                .cloned()
                .collect(),
            events_today: events_on(data.events, today).len(),
            upcoming_events: upcoming(data.events, today, DEFAULT_UPCOMING)
                .into_iter()
                .cloned()
                .collect(),
            recipe_count: data.recipes.len(),
            favorite_count: data.recipes.iter().filter(|r| r.is_favorite).count(),
            open_shopping_items: data.shopping_list.iter().filter(|i| !i.checked).count(),
        }
    }
}
