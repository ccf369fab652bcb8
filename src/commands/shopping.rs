//! Shopping list command handlers.

use crate::args::AddShoppingArgs;
use crate::commands::{plural, session, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{ShoppingItemDraft, ShoppingListItem, ShoppingListView};
use crate::store::Store;
use crate::Result;

fn line(i: &ShoppingListItem) -> String {
    let mark = if i.checked { "[x]" } else { "[ ]" };
    let unit = if i.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", i.unit)
    };
    format!("{mark} {}{unit} {}  [{}]", i.amount, i.name, i.id)
}

/// Shows the list with the open items first.
pub async fn list_shopping(store: &dyn Store) -> Result<Out<Vec<ShoppingListItem>>> {
    let user = session(store).await?;
    let items = store
        .shopping_list(&user.id)
        .await
        .pub_result(ErrorType::Store)?;
    let view = ShoppingListView::new(&items);

    let mut message = format!(
        "{} to buy, {} checked",
        plural(view.open.len(), "item", "items"),
        view.checked.len()
    );
    for i in view.open.iter().chain(view.checked.iter()) {
        message.push_str("\n  ");
        message.push_str(&line(i));
    }
    let ordered: Vec<ShoppingListItem> = view
        .open
        .iter()
        .chain(view.checked.iter())
        .map(|i| (*i).clone())
        .collect();
    Ok(Out::new(message, ordered))
}

pub async fn add_shopping_item(
    store: &mut dyn Store,
    args: AddShoppingArgs,
) -> Result<Out<ShoppingListItem>> {
    let user = session(store).await?;
    let draft = ShoppingItemDraft {
        recipe_id: None,
        name: args.name,
        amount: args.amount,
        unit: args.unit,
    };
    let mut items = store
        .add_shopping_items(&user.id, vec![draft])
        .await
        .pub_result(ErrorType::Store)?;
    let item = items.remove(0);
    Ok(Out::new(format!("Added {}", line(&item)), item))
}

/// Marks an item as bought, or as not bought when `checked` is false.
pub async fn check_shopping_item(
    store: &mut dyn Store,
    id: &str,
    checked: bool,
) -> Result<Out<ShoppingListItem>> {
    let user = session(store).await?;
    let item = store
        .set_checked(&user.id, id, checked)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Out::new(line(&item), item))
}

pub async fn remove_shopping_item(store: &mut dyn Store, id: &str) -> Result<Out<()>> {
    let user = session(store).await?;
    store
        .remove_shopping_item(&user.id, id)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(format!("Removed shopping list item {id}").into())
}

/// Removes the checked items. Open items stay on the list.
pub async fn clear_shopping_list(store: &mut dyn Store) -> Result<Out<usize>> {
    let user = session(store).await?;
    let removed = store
        .clear_checked(&user.id)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Out::new(
        format!("Removed {}", plural(removed, "checked item", "checked items")),
        removed,
    ))
}
