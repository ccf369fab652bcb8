//! The persistence and session contract, and a JSON file implementation of it.
//!
//! All rows except recipes belong to a user and every call is scoped by `user_id`. Stores assign
//! ids and timestamps on create and refresh `updated_at` on update. Asking for an id that does not
//! exist, or that belongs to another user, is an error.

mod file_store;

pub use file_store::FileStore;

use crate::error::Res;
use crate::filter::{EventFilter, RecipeFilter};
use crate::model::{
    Amount, CalendarEvent, EventDraft, Recipe, SavingsGoal, SavingsGoalDraft, ShoppingItemDraft,
    ShoppingListItem, Transaction, TransactionDraft,
};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
}

/// Async access to stored records.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// The signed-in user, if any.
    async fn current_user(&self) -> Res<Option<User>>;

    /// Newest date first.
    async fn transactions(&self, user_id: &str) -> Res<Vec<Transaction>>;
    async fn create_transaction(
        &mut self,
        user_id: &str,
        draft: TransactionDraft,
    ) -> Res<Transaction>;
    async fn update_transaction(
        &mut self,
        user_id: &str,
        id: &str,
        draft: TransactionDraft,
    ) -> Res<Transaction>;
    async fn delete_transaction(&mut self, user_id: &str, id: &str) -> Res<()>;

    /// Oldest first.
    async fn savings_goals(&self, user_id: &str) -> Res<Vec<SavingsGoal>>;
    async fn create_savings_goal(
        &mut self,
        user_id: &str,
        draft: SavingsGoalDraft,
    ) -> Res<SavingsGoal>;
    async fn update_savings_goal(
        &mut self,
        user_id: &str,
        id: &str,
        draft: SavingsGoalDraft,
    ) -> Res<SavingsGoal>;
    /// Replaces the saved amount of a goal, leaving its other fields alone.
    async fn set_savings_amount(
        &mut self,
        user_id: &str,
        id: &str,
        current_amount: Amount,
    ) -> Res<SavingsGoal>;
    async fn delete_savings_goal(&mut self, user_id: &str, id: &str) -> Res<()>;

    /// Events matching `filter`, earliest start first.
    async fn events(&self, user_id: &str, filter: &EventFilter) -> Res<Vec<CalendarEvent>>;
    async fn create_event(&mut self, user_id: &str, draft: EventDraft) -> Res<CalendarEvent>;
    async fn update_event(
        &mut self,
        user_id: &str,
        id: &str,
        draft: EventDraft,
    ) -> Res<CalendarEvent>;
    async fn delete_event(&mut self, user_id: &str, id: &str) -> Res<()>;

    /// Catalog recipes matching `filter`, newest first, with `is_favorite` set for `user_id`.
    async fn recipes(&self, user_id: &str, filter: &RecipeFilter) -> Res<Vec<Recipe>>;
    async fn recipe(&self, user_id: &str, id: &str) -> Res<Recipe>;
    /// Adds recipes to the catalog, replacing any with the same id. Returns the stored recipes.
    async fn import_recipes(&mut self, recipes: Vec<Recipe>) -> Res<Vec<Recipe>>;
    /// Flips the favorite flag of a recipe for `user_id` and returns the new state.
    async fn toggle_favorite(&mut self, user_id: &str, recipe_id: &str) -> Res<bool>;

    /// Newest first.
    async fn shopping_list(&self, user_id: &str) -> Res<Vec<ShoppingListItem>>;
    async fn add_shopping_items(
        &mut self,
        user_id: &str,
        drafts: Vec<ShoppingItemDraft>,
    ) -> Res<Vec<ShoppingListItem>>;
    async fn set_checked(
        &mut self,
        user_id: &str,
        id: &str,
        checked: bool,
    ) -> Res<ShoppingListItem>;
    async fn remove_shopping_item(&mut self, user_id: &str, id: &str) -> Res<()>;
    /// Removes the checked items and returns how many were removed. Open items stay.
    async fn clear_checked(&mut self, user_id: &str) -> Res<usize>;
}

/// A user's favorite recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub user_id: String,
    pub recipe_id: String,
    pub created_at: DateTime<Utc>,
}

/// Everything a `FileStore` persists, in one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub favorites: Vec<Favorite>,
    #[serde(default)]
    pub shopping_list: Vec<ShoppingListItem>,
}

/// The JSON schema of the data file.
pub fn dataset_schema() -> schemars::Schema {
    schemars::schema_for!(Dataset)
}
