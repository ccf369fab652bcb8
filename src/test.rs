//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{
    Amount, DietaryRestriction, Difficulty, EventCategory, EventDraft, Ingredient, MealType,
    Recipe, Reminder, SavingsGoalDraft, TransactionDraft, TransactionType,
};
use crate::store::{FileStore, Store};
use crate::Config;
use chrono::{NaiveDate, TimeZone, Utc};
use std::path::Path;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment with a pocketplan home directory, a config and a data file.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment signed in as `test-user`, seeded with transactions in April and
    /// May 2024, a savings goal, two events in April 2024 and two recipes.
    pub async fn new() -> Self {
        let env = Self::with_user("test-user").await;
        env.seed().await;
        env
    }

    /// Creates an empty test environment with nobody signed in.
    pub async fn signed_out() -> Self {
        Self::with_user("").await
    }

    async fn with_user(user_id: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("pocketplan");
        let config = Config::create(&root, user_id).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A store over the environment's data file, signed in as the configured user.
    pub fn store(&self) -> FileStore {
        self.config.store()
    }

    /// The home directory.
    pub fn root(&self) -> &Path {
        self.config.root()
    }

    async fn seed(&self) {
        let mut store = self.store();
        let user = self.config.user_id().to_string();

        for (transaction_type, amount, category, description, day) in [
            (TransactionType::Income, "850", "salary", "Nebenjob", (2024, 4, 1)),
            (TransactionType::Expense, "320", "housing", "Miete", (2024, 4, 3)),
            (TransactionType::Expense, "42.50", "food", "Mensa", (2024, 4, 15)),
            (TransactionType::Expense, "49", "transport", "Semesterticket", (2024, 5, 2)),
            (TransactionType::Income, "200", "allowance", "Eltern", (2024, 5, 5)),
            (TransactionType::Expense, "18.90", "food", "Supermarkt", (2024, 5, 18)),
        ] {
            let draft = TransactionDraft {
                transaction_type,
                amount: amount_of(amount),
                category: category.to_string(),
                description: description.to_string(),
                date: date(day),
            };
            store.create_transaction(&user, draft).await.unwrap();
        }

        store
            .create_savings_goal(
                &user,
                SavingsGoalDraft {
                    name: "Laptop".to_string(),
                    target_amount: amount_of("1000"),
                    current_amount: amount_of("250"),
                    target_date: Some(date((2024, 12, 1))),
                },
            )
            .await
            .unwrap();

        for (title, category, day, hours) in [
            ("Vorlesung Analysis", EventCategory::Uni, (2024, 4, 10), (10, 12)),
            ("Spieleabend", EventCategory::Social, (2024, 4, 12), (19, 23)),
        ] {
            let day = date(day);
            let draft = EventDraft {
                title: title.to_string(),
                description: None,
                category,
                start_date: day.and_hms_opt(hours.0, 0, 0).unwrap(),
                end_date: day.and_hms_opt(hours.1, 0, 0).unwrap(),
                location: None,
                reminder: Reminder::default(),
                is_all_day: false,
                recurring: None,
            };
            store.create_event(&user, draft).await.unwrap();
        }

        store
            .import_recipes(vec![
                recipe(
                    "r-porridge",
                    "Porridge",
                    (2024, 1, 1),
                    vec![MealType::Breakfast],
                    vec![DietaryRestriction::Vegetarian, DietaryRestriction::Vegan],
                    vec![("Haferflocken", 50.0, "g"), ("Hafermilch", 0.2, "l")],
                ),
                recipe(
                    "r-pasta",
                    "Nudeln mit Tomatensoße",
                    (2024, 1, 2),
                    vec![MealType::Lunch, MealType::Dinner],
                    vec![DietaryRestriction::Vegetarian],
                    vec![("Nudeln", 250.0, "g"), ("Tomaten", 400.0, "g"), ("Parmesan", 30.0, "g")],
                ),
            ])
            .await
            .unwrap();
    }
}

fn amount_of(s: &str) -> Amount {
    Amount::from_str(s).unwrap()
}

fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn recipe(
    id: &str,
    title: &str,
    created: (i32, u32, u32),
    meal_type: Vec<MealType>,
    dietary: Vec<DietaryRestriction>,
    ingredients: Vec<(&str, f64, &str)>,
) -> Recipe {
    let (y, m, d) = created;
    let created_at = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        image_url: None,
        prep_time: 10,
        cook_time: 5,
        servings: 2,
        difficulty: Difficulty::Easy,
        estimated_cost: amount_of("2.50"),
        meal_type,
        dietary,
        ingredients: ingredients
            .into_iter()
            .map(|(name, amount, unit)| Ingredient {
                name: name.to_string(),
                amount,
                unit: unit.to_string(),
            })
            .collect(),
        instructions: vec!["Alles zusammen kochen.".to_string()],
        nutrition: None,
        tags: vec![],
        is_favorite: false,
        created_at,
        updated_at: created_at,
    }
}
