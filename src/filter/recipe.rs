use crate::filter::{overlaps, toggle};
use crate::model::{Amount, DietaryRestriction, Difficulty, MealType, Recipe};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A recipe filter as the user supplies it. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilterInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<Vec<MealType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<Vec<DietaryRestriction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_prep_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cost: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Vec<Difficulty>>,
}

/// A complete recipe filter. `RecipeFilter::default()` matches every recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilter {
    pub meal_type: BTreeSet<MealType>,
    pub dietary: BTreeSet<DietaryRestriction>,
    pub max_prep_time: Option<u32>,
    pub max_cost: Option<Amount>,
    pub difficulty: BTreeSet<Difficulty>,
}

impl RecipeFilter {
    /// Fills in missing fields with empty sets and no bounds. Duplicate list entries collapse.
    pub fn normalize(input: RecipeFilterInput) -> Self {
        Self {
            meal_type: input.meal_type.unwrap_or_default().into_iter().collect(),
            dietary: input.dietary.unwrap_or_default().into_iter().collect(),
            max_prep_time: input.max_prep_time,
            max_cost: input.max_cost,
            difficulty: input.difficulty.unwrap_or_default().into_iter().collect(),
        }
    }

    pub fn toggle_meal_type(&mut self, value: MealType) -> bool {
        toggle(&mut self.meal_type, value)
    }

    pub fn toggle_dietary(&mut self, value: DietaryRestriction) -> bool {
        toggle(&mut self.dietary, value)
    }

    pub fn toggle_difficulty(&mut self, value: Difficulty) -> bool {
        toggle(&mut self.difficulty, value)
    }

    /// True if any set is non-empty or any bound is given. A bound of zero counts as given.
    pub fn has_active_filters(&self) -> bool {
        !self.meal_type.is_empty()
            || !self.dietary.is_empty()
            || !self.difficulty.is_empty()
            || self.max_prep_time.is_some()
            || self.max_cost.is_some()
    }

    /// Whether `recipe` passes the filter.
    ///
    /// Meal types and dietary restrictions match when the recipe has at least one of the selected
    /// values; difficulty matches when it is one of the selected values. Bounds are inclusive. A
    /// bound of zero is not applied, which keeps "0" meaning "no limit" as the fetch layer treats
    /// it.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if !self.meal_type.is_empty() && !overlaps(&self.meal_type, &recipe.meal_type) {
            return false;
        }
        if !self.dietary.is_empty() && !overlaps(&self.dietary, &recipe.dietary) {
            return false;
        }
        if !self.difficulty.is_empty() && !self.difficulty.contains(&recipe.difficulty) {
            return false;
        }
        if let Some(max) = self.max_prep_time.filter(|m| *m > 0) {
            if recipe.prep_time > max {
                return false;
            }
        }
        if let Some(max) = self.max_cost.filter(|m| !m.is_zero()) {
            if recipe.estimated_cost > max {
                return false;
            }
        }
        true
    }

    /// Applies `matches` to a list of recipes.
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|r| self.matches(r)).collect()
    }
}

impl From<RecipeFilterInput> for RecipeFilter {
    fn from(input: RecipeFilterInput) -> Self {
        Self::normalize(input)
    }
}
