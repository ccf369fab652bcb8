use crate::model::Amount;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

serde_plain::derive_display_from_serialize!(MealType);
serde_plain::derive_fromstr_from_deserialize!(MealType);

impl MealType {
    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "Frühstück",
            MealType::Lunch => "Mittag",
            MealType::Dinner => "Abendessen",
            MealType::Snack => "Snack",
            MealType::Dessert => "Dessert",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    LactoseFree,
    None,
}

serde_plain::derive_display_from_serialize!(DietaryRestriction);
serde_plain::derive_fromstr_from_deserialize!(DietaryRestriction);

impl DietaryRestriction {
    pub fn label(self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "Vegetarisch",
            DietaryRestriction::Vegan => "Vegan",
            DietaryRestriction::GlutenFree => "Glutenfrei",
            DietaryRestriction::LactoseFree => "Laktosefrei",
            DietaryRestriction::None => "Keine",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

serde_plain::derive_display_from_serialize!(Difficulty);
serde_plain::derive_fromstr_from_deserialize!(Difficulty);

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Einfach",
            Difficulty::Medium => "Mittel",
            Difficulty::Hard => "Schwer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A recipe from the shared catalog. Recipes are not owned by a user; favorites are tracked
/// separately.
///
/// An empty `id` and missing timestamps are filled in when recipes are imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Minutes.
    pub prep_time: u32,
    /// Minutes.
    #[serde(default)]
    pub cook_time: u32,
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub estimated_cost: Amount,
    #[serde(default)]
    pub meal_type: Vec<MealType>,
    #[serde(default)]
    pub dietary: Vec<DietaryRestriction>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Filled in per user when recipes are fetched, never stored.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_favorite: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dietary_codes_are_kebab_case() {
        assert_eq!(DietaryRestriction::GlutenFree.to_string(), "gluten-free");
        assert_eq!(
            "lactose-free".parse::<DietaryRestriction>().unwrap(),
            DietaryRestriction::LactoseFree
        );
    }

    #[test]
    fn test_deserialize_minimal_recipe() {
        let json = r#"{
            "id": "r1",
            "title": "Porridge",
            "prepTime": 5,
            "servings": 1,
            "estimatedCost": 0.8,
            "mealType": ["breakfast"],
            "dietary": ["vegetarian", "vegan"],
            "ingredients": [{ "name": "Haferflocken", "amount": 50, "unit": "g" }],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let r: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(r.difficulty, Difficulty::Easy);
        assert_eq!(r.meal_type, vec![MealType::Breakfast]);
        assert_eq!(r.ingredients.len(), 1);
        assert!(!r.is_favorite);
        assert_eq!(r.total_time(), 5);
    }
}
