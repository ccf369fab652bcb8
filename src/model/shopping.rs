use crate::model::Recipe;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One line on a user's shopping list, optionally linked to the recipe it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub checked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields needed to add an item to the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl ShoppingItemDraft {
    /// One draft per ingredient of `recipe`, each linked back to the recipe.
    pub fn from_recipe(recipe: &Recipe) -> Vec<ShoppingItemDraft> {
        recipe
            .ingredients
            .iter()
            .map(|i| ShoppingItemDraft {
                recipe_id: Some(recipe.id.clone()),
                name: i.name.clone(),
                amount: i.amount,
                unit: i.unit.clone(),
            })
            .collect()
    }

    pub(crate) fn into_item(
        self,
        id: String,
        user_id: String,
        now: DateTime<Utc>,
    ) -> ShoppingListItem {
        ShoppingListItem {
            id,
            user_id,
            recipe_id: self.recipe_id,
            name: self.name,
            amount: self.amount,
            unit: self.unit,
            checked: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A shopping list split into what is still to buy and what is already in the basket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListView<'a> {
    pub open: Vec<&'a ShoppingListItem>,
    pub checked: Vec<&'a ShoppingListItem>,
}

impl<'a> ShoppingListView<'a> {
    pub fn new(items: &'a [ShoppingListItem]) -> Self {
        let (checked, open) = items.iter().partition(|i| i.checked);
        Self { open, checked }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Ingredient};

    fn recipe() -> Recipe {
        let now = Utc::now();
        Recipe {
            id: "r1".to_string(),
            title: "Pfannkuchen".to_string(),
            description: String::new(),
            image_url: None,
            prep_time: 10,
            cook_time: 15,
            servings: 2,
            difficulty: Default::default(),
            estimated_cost: Amount::ZERO,
            meal_type: vec![],
            dietary: vec![],
            ingredients: vec![
                Ingredient {
                    name: "Mehl".to_string(),
                    amount: 200.0,
                    unit: "g".to_string(),
                },
                Ingredient {
                    name: "Milch".to_string(),
                    amount: 0.3,
                    unit: "l".to_string(),
                },
            ],
            instructions: vec![],
            nutrition: None,
            tags: vec![],
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_drafts_from_recipe() {
        let drafts = ShoppingItemDraft::from_recipe(&recipe());
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Mehl");
        assert_eq!(drafts[1].recipe_id.as_deref(), Some("r1"));
    }

    #[test]
    fn test_view_partitions_by_checked() {
        let now = Utc::now();
        let mut items: Vec<ShoppingListItem> = ShoppingItemDraft::from_recipe(&recipe())
            .into_iter()
            .enumerate()
            .map(|(ix, d)| d.into_item(ix.to_string(), "u1".to_string(), now))
            .collect();
        items[1].checked = true;
        let view = ShoppingListView::new(&items);
        assert_eq!(view.open.len(), 1);
        assert_eq!(view.open[0].name, "Mehl");
        assert_eq!(view.checked.len(), 1);
        assert_eq!(view.checked[0].name, "Milch");
    }
}
