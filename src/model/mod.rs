//! Types that represent the core data model, such as `Transaction`, `SavingsGoal` and the
//! category registry.
mod amount;
mod category;
mod event;
mod recipe;
mod savings;
mod shopping;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::{
    lookup, CategoryInfo, CategoryKind, EventCategory, ExpenseCategory, IncomeSource, Taxonomy,
};
pub use event::{CalendarEvent, EventDraft, Frequency, Recurrence, Reminder};
pub use recipe::{DietaryRestriction, Difficulty, Ingredient, MealType, Nutrition, Recipe};
pub use savings::{SavingsGoal, SavingsGoalDraft};
pub use shopping::{ShoppingItemDraft, ShoppingListItem, ShoppingListView};
pub use transaction::{recent, Transaction, TransactionDraft, TransactionType};
