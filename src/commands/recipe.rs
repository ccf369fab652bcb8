//! Recipe command handlers.

use crate::args::ListRecipeArgs;
use crate::commands::{plural, session, Out};
use crate::error::{ErrorType, IntoResult};
use crate::filter::{RecipeFilter, RecipeFilterInput};
use crate::model::{Recipe, ShoppingItemDraft, ShoppingListItem};
use crate::store::Store;
use crate::{utils, Result};
use anyhow::Context;
use std::path::Path;

fn line(r: &Recipe) -> String {
    let star = if r.is_favorite { " *" } else { "" };
    format!(
        "{}{star}  ({}, {} min, {})  [{}]",
        r.title,
        r.difficulty.label(),
        r.total_time(),
        r.estimated_cost,
        r.id
    )
}

/// Reads a JSON array of recipes from `file` and adds them to the catalog.
pub async fn import_recipes(store: &mut dyn Store, file: &Path) -> Result<Out<Vec<Recipe>>> {
    let recipes: Vec<Recipe> = utils::deserialize(file)
        .await
        .context("Unable to read recipes")
        .pub_result(ErrorType::Validation)?;
    let stored = store
        .import_recipes(recipes)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Out::new(
        format!(
            "Imported {} from {}",
            plural(stored.len(), "recipe", "recipes"),
            file.display()
        ),
        stored,
    ))
}

/// Lists recipes matching the filter flags. Recipes are shared, but favorites belong to the
/// signed-in user.
pub async fn list_recipes(store: &dyn Store, args: ListRecipeArgs) -> Result<Out<Vec<Recipe>>> {
    let user = session(store).await?;
    let filter = RecipeFilter::normalize(RecipeFilterInput {
        meal_type: Some(args.meal_type),
        dietary: Some(args.dietary),
        max_prep_time: args.max_prep_time,
        max_cost: args.max_cost,
        difficulty: Some(args.difficulty),
    });
    let mut recipes = store
        .recipes(&user.id, &filter)
        .await
        .pub_result(ErrorType::Store)?;
    if args.favorites {
        recipes.retain(|r| r.is_favorite);
    }

    let mut message = plural(recipes.len(), "recipe", "recipes");
    if filter.has_active_filters() || args.favorites {
        message.push_str(" (filtered)");
    }
    for r in &recipes {
        message.push_str("\n  ");
        message.push_str(&line(r));
    }
    Ok(Out::new(message, recipes))
}

pub async fn show_recipe(store: &dyn Store, id: &str) -> Result<Out<Recipe>> {
    let user = session(store).await?;
    let recipe = store
        .recipe(&user.id, id)
        .await
        .pub_result(ErrorType::Store)?;

    let mut message = line(&recipe);
    if !recipe.description.is_empty() {
        message.push_str(&format!("\n{}", recipe.description));
    }
    let meals: Vec<&str> = recipe.meal_type.iter().map(|m| m.label()).collect();
    let dietary: Vec<&str> = recipe.dietary.iter().map(|d| d.label()).collect();
    message.push_str(&format!(
        "\n{} servings; {}; {}",
        recipe.servings,
        meals.join(", "),
        dietary.join(", ")
    ));
    message.push_str("\nIngredients:");
    for i in &recipe.ingredients {
        message.push_str(&format!("\n  {} {} {}", i.amount, i.unit, i.name));
    }
    for (ix, step) in recipe.instructions.iter().enumerate() {
        message.push_str(&format!("\n{}. {step}", ix + 1));
    }
    Ok(Out::new(message, recipe))
}

/// Flips the favorite flag of a recipe for the signed-in user. The structure is the new state.
pub async fn toggle_favorite(store: &mut dyn Store, id: &str) -> Result<Out<bool>> {
    let user = session(store).await?;
    let is_favorite = store
        .toggle_favorite(&user.id, id)
        .await
        .pub_result(ErrorType::Store)?;
    let message = if is_favorite {
        format!("Recipe {id} is now a favorite")
    } else {
        format!("Recipe {id} is no longer a favorite")
    };
    Ok(Out::new(message, is_favorite))
}

/// Puts every ingredient of a recipe on the shopping list.
pub async fn shop_recipe(store: &mut dyn Store, id: &str) -> Result<Out<Vec<ShoppingListItem>>> {
    let user = session(store).await?;
    let recipe = store
        .recipe(&user.id, id)
        .await
        .pub_result(ErrorType::Store)?;
    let items = store
        .add_shopping_items(&user.id, ShoppingItemDraft::from_recipe(&recipe))
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Out::new(
        format!(
            "Added {} for '{}' to the shopping list",
            plural(items.len(), "item", "items"),
            recipe.title
        ),
        items,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DietaryRestriction;
    use crate::test::TestEnv;

    fn no_filters() -> ListRecipeArgs {
        ListRecipeArgs {
            meal_type: vec![],
            dietary: vec![],
            difficulty: vec![],
            max_prep_time: None,
            max_cost: None,
            favorites: false,
        }
    }

    #[tokio::test]
    async fn test_import_file() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        let path = env.root().join("recipes.json");
        let json = r#"[{ "title": "Toast", "prepTime": 3, "servings": 1, "estimatedCost": 0.5 }]"#;
        utils::write(&path, json).await.unwrap();

        let out = import_recipes(&mut store, &path).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 1);

        let bad = env.root().join("bad.json");
        utils::write(&bad, "{").await.unwrap();
        let err = import_recipes(&mut store, &bad).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_list_favorites_and_filters() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        let all = list_recipes(&store, no_filters()).await.unwrap();
        let all = all.structure().unwrap();
        assert!(all.len() >= 2);

        let first = all[0].id.clone();
        assert!(*toggle_favorite(&mut store, &first)
            .await
            .unwrap()
            .structure()
            .unwrap());

        let mut args = no_filters();
        args.favorites = true;
        let favs = list_recipes(&store, args).await.unwrap();
        assert_eq!(favs.structure().unwrap().len(), 1);
        assert_eq!(favs.structure().unwrap()[0].id, first);

        let mut args = no_filters();
        args.dietary = vec![DietaryRestriction::Vegan];
        let vegan = list_recipes(&store, args).await.unwrap();
        assert!(vegan
            .structure()
            .unwrap()
            .iter()
            .all(|r| r.dietary.contains(&DietaryRestriction::Vegan)));
    }

    #[tokio::test]
    async fn test_shop_recipe() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        let recipes = list_recipes(&store, no_filters()).await.unwrap();
        let recipe = recipes.structure().unwrap()[0].clone();

        let out = shop_recipe(&mut store, &recipe.id).await.unwrap();
        let items = out.structure().unwrap();
        assert_eq!(items.len(), recipe.ingredients.len());
        assert!(items
            .iter()
            .all(|i| i.recipe_id.as_deref() == Some(recipe.id.as_str())));

        let shown = show_recipe(&store, &recipe.id).await.unwrap();
        assert!(shown.message().contains("Ingredients:"));
    }
}
