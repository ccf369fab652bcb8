//! Implements the `Store` trait over a single JSON file holding a `Dataset`.

use crate::error::Res;
use crate::filter::{EventFilter, RecipeFilter};
use crate::model::{
    Amount, CalendarEvent, EventDraft, Recipe, SavingsGoal, SavingsGoalDraft, ShoppingItemDraft,
    ShoppingListItem, Transaction, TransactionDraft,
};
use crate::store::{Dataset, Favorite, Store, User};
use crate::utils;
use anyhow::Context;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use uuid::Uuid;

/// A `Store` that reads the data file on every call and rewrites it after every change. The
/// session is the user id from `config.json`; an empty id means nobody is signed in.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    user_id: String,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, user_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            user_id: user_id.into(),
        }
    }

    /// Writes an empty data file at `path`, unless one already exists.
    pub(crate) async fn create_empty(path: &Path) -> Res<()> {
        if path.is_file() {
            debug!("Keeping existing data file {}", path.display());
            return Ok(());
        }
        utils::serialize(path, &Dataset::default())
            .await
            .context("Unable to create the data file")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Res<Dataset> {
        trace!("Loading {}", self.path.display());
        utils::deserialize(&self.path).await
    }

    async fn save(&self, data: &Dataset) -> Res<()> {
        trace!("Saving {}", self.path.display());
        utils::serialize(&self.path, data).await
    }
}

/// A stored record that belongs to one user.
trait Owned {
    const NAME: &'static str;
    fn id(&self) -> &str;
    fn user_id(&self) -> &str;
}

macro_rules! owned {
    ($t:ty, $name:literal) => {
        impl Owned for $t {
            const NAME: &'static str = $name;
            fn id(&self) -> &str {
                &self.id
            }
            fn user_id(&self) -> &str {
                &self.user_id
            }
        }
    };
}

owned!(Transaction, "Transaction");
owned!(SavingsGoal, "Savings goal");
owned!(CalendarEvent, "Event");
owned!(ShoppingListItem, "Shopping list item");

fn position<T: Owned>(rows: &[T], user_id: &str, id: &str) -> Res<usize> {
    rows.iter()
        .position(|r| r.id() == id && r.user_id() == user_id)
        .with_context(|| format!("{} '{id}' not found", T::NAME))
}

fn owned_by<T: Owned + Clone>(rows: &[T], user_id: &str) -> Vec<T> {
    rows.iter()
        .filter(|r| r.user_id() == user_id)
        .cloned()
        .collect()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn with_favorite(mut recipe: Recipe, favorites: &[Favorite], user_id: &str) -> Recipe {
    recipe.is_favorite = favorites
        .iter()
        .any(|f| f.user_id == user_id && f.recipe_id == recipe.id);
    recipe
}

#[async_trait::async_trait]
impl Store for FileStore {
    async fn current_user(&self) -> Res<Option<User>> {
        if self.user_id.is_empty() {
            return Ok(None);
        }
        Ok(Some(User {
            id: self.user_id.clone(),
        }))
    }

    async fn transactions(&self, user_id: &str) -> Res<Vec<Transaction>> {
        let data = self.load().await?;
        let mut rows = owned_by(&data.transactions, user_id);
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn create_transaction(
        &mut self,
        user_id: &str,
        draft: TransactionDraft,
    ) -> Res<Transaction> {
        let mut data = self.load().await?;
        let row = draft.into_transaction(new_id(), user_id.to_string(), Utc::now());
        data.transactions.push(row.clone());
        self.save(&data).await?;
        debug!("Created transaction {}", row.id);
        Ok(row)
    }

    async fn update_transaction(
        &mut self,
        user_id: &str,
        id: &str,
        draft: TransactionDraft,
    ) -> Res<Transaction> {
        let mut data = self.load().await?;
        let ix = position(&data.transactions, user_id, id)?;
        let created_at = data.transactions[ix].created_at;
        let mut row = draft.into_transaction(id.to_string(), user_id.to_string(), Utc::now());
        row.created_at = created_at;
        data.transactions[ix] = row.clone();
        self.save(&data).await?;
        Ok(row)
    }

    async fn delete_transaction(&mut self, user_id: &str, id: &str) -> Res<()> {
        let mut data = self.load().await?;
        let ix = position(&data.transactions, user_id, id)?;
        data.transactions.remove(ix);
        self.save(&data).await?;
        debug!("Deleted transaction {id}");
        Ok(())
    }

    async fn savings_goals(&self, user_id: &str) -> Res<Vec<SavingsGoal>> {
        let data = self.load().await?;
        let mut rows = owned_by(&data.savings_goals, user_id);
        rows.sort_by_key(|g| g.created_at);
        Ok(rows)
    }

    async fn create_savings_goal(
        &mut self,
        user_id: &str,
        draft: SavingsGoalDraft,
    ) -> Res<SavingsGoal> {
        let mut data = self.load().await?;
        let row = draft.into_goal(new_id(), user_id.to_string(), Utc::now());
        data.savings_goals.push(row.clone());
        self.save(&data).await?;
        debug!("Created savings goal {}", row.id);
        Ok(row)
    }

    async fn update_savings_goal(
        &mut self,
        user_id: &str,
        id: &str,
        draft: SavingsGoalDraft,
    ) -> Res<SavingsGoal> {
        let mut data = self.load().await?;
        let ix = position(&data.savings_goals, user_id, id)?;
        let created_at = data.savings_goals[ix].created_at;
        let mut row = draft.into_goal(id.to_string(), user_id.to_string(), Utc::now());
        row.created_at = created_at;
        data.savings_goals[ix] = row.clone();
        self.save(&data).await?;
        Ok(row)
    }

    async fn set_savings_amount(
        &mut self,
        user_id: &str,
        id: &str,
        current_amount: Amount,
    ) -> Res<SavingsGoal> {
        let mut data = self.load().await?;
        let ix = position(&data.savings_goals, user_id, id)?;
        let row = &mut data.savings_goals[ix];
        row.current_amount = current_amount;
        row.updated_at = Utc::now();
        let row = row.clone();
        self.save(&data).await?;
        Ok(row)
    }

    async fn delete_savings_goal(&mut self, user_id: &str, id: &str) -> Res<()> {
        let mut data = self.load().await?;
        let ix = position(&data.savings_goals, user_id, id)?;
        data.savings_goals.remove(ix);
        self.save(&data).await?;
        debug!("Deleted savings goal {id}");
        Ok(())
    }

    async fn events(&self, user_id: &str, filter: &EventFilter) -> Res<Vec<CalendarEvent>> {
        let data = self.load().await?;
        let mut rows: Vec<CalendarEvent> = owned_by(&data.events, user_id)
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();
        rows.sort_by_key(|e| e.start_date);
        Ok(rows)
    }

    async fn create_event(&mut self, user_id: &str, draft: EventDraft) -> Res<CalendarEvent> {
        let mut data = self.load().await?;
        let row = draft.into_event(new_id(), user_id.to_string(), Utc::now());
        data.events.push(row.clone());
        self.save(&data).await?;
        debug!("Created event {}", row.id);
        Ok(row)
    }

    async fn update_event(
        &mut self,
        user_id: &str,
        id: &str,
        draft: EventDraft,
    ) -> Res<CalendarEvent> {
        let mut data = self.load().await?;
        let ix = position(&data.events, user_id, id)?;
        let created_at = data.events[ix].created_at;
        let mut row = draft.into_event(id.to_string(), user_id.to_string(), Utc::now());
        row.created_at = created_at;
        data.events[ix] = row.clone();
        self.save(&data).await?;
        Ok(row)
    }

    async fn delete_event(&mut self, user_id: &str, id: &str) -> Res<()> {
        let mut data = self.load().await?;
        let ix = position(&data.events, user_id, id)?;
        data.events.remove(ix);
        self.save(&data).await?;
        debug!("Deleted event {id}");
        Ok(())
    }

    async fn recipes(&self, user_id: &str, filter: &RecipeFilter) -> Res<Vec<Recipe>> {
        let data = self.load().await?;
        let mut rows: Vec<Recipe> = data
            .recipes
            .into_iter()
            .filter(|r| filter.matches(r))
            .map(|r| with_favorite(r, &data.favorites, user_id))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn recipe(&self, user_id: &str, id: &str) -> Res<Recipe> {
        let data = self.load().await?;
        let recipe = data
            .recipes
            .into_iter()
            .find(|r| r.id == id)
            .with_context(|| format!("Recipe '{id}' not found"))?;
        Ok(with_favorite(recipe, &data.favorites, user_id))
    }

    async fn import_recipes(&mut self, recipes: Vec<Recipe>) -> Res<Vec<Recipe>> {
        let mut data = self.load().await?;
        let mut stored = Vec::with_capacity(recipes.len());
        for mut recipe in recipes {
            if recipe.id.is_empty() {
                recipe.id = new_id();
            }
            recipe.is_favorite = false;
            match data.recipes.iter_mut().find(|r| r.id == recipe.id) {
                Some(existing) => {
                    trace!("Replacing recipe {}", recipe.id);
                    recipe.created_at = existing.created_at;
                    recipe.updated_at = Utc::now();
                    *existing = recipe.clone();
                }
                None => data.recipes.push(recipe.clone()),
            }
            stored.push(recipe);
        }
        self.save(&data).await?;
        debug!("Imported {} recipes", stored.len());
        Ok(stored)
    }

    async fn toggle_favorite(&mut self, user_id: &str, recipe_id: &str) -> Res<bool> {
        let mut data = self.load().await?;
        anyhow::ensure!(
            data.recipes.iter().any(|r| r.id == recipe_id),
            "Recipe '{recipe_id}' not found"
        );
        let existing = data
            .favorites
            .iter()
            .position(|f| f.user_id == user_id && f.recipe_id == recipe_id);
        let is_favorite = match existing {
            Some(ix) => {
                data.favorites.remove(ix);
                false
            }
            None => {
                data.favorites.push(Favorite {
                    user_id: user_id.to_string(),
                    recipe_id: recipe_id.to_string(),
                    created_at: Utc::now(),
                });
                true
            }
        };
        self.save(&data).await?;
        Ok(is_favorite)
    }

    async fn shopping_list(&self, user_id: &str) -> Res<Vec<ShoppingListItem>> {
        let data = self.load().await?;
        let mut rows = owned_by(&data.shopping_list, user_id);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn add_shopping_items(
        &mut self,
        user_id: &str,
        drafts: Vec<ShoppingItemDraft>,
    ) -> Res<Vec<ShoppingListItem>> {
        let mut data = self.load().await?;
        let now = Utc::now();
        let rows: Vec<ShoppingListItem> = drafts
            .into_iter()
            .map(|d| d.into_item(new_id(), user_id.to_string(), now))
            .collect();
        data.shopping_list.extend(rows.iter().cloned());
        self.save(&data).await?;
        debug!("Added {} shopping list items", rows.len());
        Ok(rows)
    }

    async fn set_checked(
        &mut self,
        user_id: &str,
        id: &str,
        checked: bool,
    ) -> Res<ShoppingListItem> {
        let mut data = self.load().await?;
        let ix = position(&data.shopping_list, user_id, id)?;
        let row = &mut data.shopping_list[ix];
        row.checked = checked;
        row.updated_at = Utc::now();
        let row = row.clone();
        self.save(&data).await?;
        Ok(row)
    }

    async fn remove_shopping_item(&mut self, user_id: &str, id: &str) -> Res<()> {
        let mut data = self.load().await?;
        let ix = position(&data.shopping_list, user_id, id)?;
        data.shopping_list.remove(ix);
        self.save(&data).await?;
        Ok(())
    }

    async fn clear_checked(&mut self, user_id: &str) -> Res<usize> {
        let mut data = self.load().await?;
        let before = data.shopping_list.len();
        data.shopping_list
            .retain(|i| !(i.user_id == user_id && i.checked));
        let removed = before - data.shopping_list.len();
        self.save(&data).await?;
        debug!("Cleared {removed} checked shopping list items");
        Ok(removed)
    }
}
