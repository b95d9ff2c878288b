//! Shopping cart toggler and shopping-list aggregation

use crate::error::{map_unique_violation, CoreError, CoreResult};
use crate::infrastructure::database::entities::{
    ingredient, recipe_ingredient, shopping_list_entry,
};
use crate::operations::recipes;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// One aggregated line of a user's shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListLine {
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Put a recipe in a user's cart
pub async fn add_to_cart(
    db: &DatabaseConnection,
    user_id: i32,
    recipe_id: i32,
) -> CoreResult<shopping_list_entry::Model> {
    recipes::get_recipe(db, recipe_id).await?;

    let existing = shopping_list_entry::Entity::find()
        .filter(shopping_list_entry::Column::UserId.eq(user_id))
        .filter(shopping_list_entry::Column::RecipeId.eq(recipe_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(CoreError::conflict(format!(
            "recipe {} is already in the cart of user {}",
            recipe_id, user_id
        )));
    }

    let conflict = format!(
        "recipe {} is already in the cart of user {}",
        recipe_id, user_id
    );
    let created = shopping_list_entry::ActiveModel {
        user_id: Set(user_id),
        recipe_id: Set(recipe_id),
        ..shopping_list_entry::ActiveModel::new()
    }
    .insert(db)
    .await
    .map_err(|e| map_unique_violation(e, conflict))?;

    info!(user_id, recipe_id, "added recipe to cart");
    Ok(created)
}

/// Remove a recipe from a user's cart; the entry must exist
pub async fn remove_from_cart(
    db: &DatabaseConnection,
    user_id: i32,
    recipe_id: i32,
) -> CoreResult<()> {
    let result = shopping_list_entry::Entity::delete_many()
        .filter(shopping_list_entry::Column::UserId.eq(user_id))
        .filter(shopping_list_entry::Column::RecipeId.eq(recipe_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(CoreError::not_found(
            "shopping list entry",
            format!("(user {}, recipe {})", user_id, recipe_id),
        ));
    }

    info!(user_id, recipe_id, "removed recipe from cart");
    Ok(())
}

/// Whether a recipe is in a user's cart; used by projections
pub async fn is_in_cart(db: &DatabaseConnection, user_id: i32, recipe_id: i32) -> CoreResult<bool> {
    let count = shopping_list_entry::Entity::find()
        .filter(shopping_list_entry::Column::UserId.eq(user_id))
        .filter(shopping_list_entry::Column::RecipeId.eq(recipe_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Aggregate a user's cart into a shopping list.
///
/// Collects the ingredient lines of every recipe in the cart, groups them
/// by ingredient identity (not display name, so two ingredients that happen
/// to share a name stay separate), and sums the amounts. Pure read; sorted
/// by ingredient name then id so repeated calls are stable.
pub async fn shopping_list(
    db: &DatabaseConnection,
    user_id: i32,
) -> CoreResult<Vec<ShoppingListLine>> {
    let recipe_ids: Vec<i32> = shopping_list_entry::Entity::find()
        .filter(shopping_list_entry::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|entry| entry.recipe_id)
        .collect();
    if recipe_ids.is_empty() {
        return Ok(Vec::new());
    }

    let lines = recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::RecipeId.is_in(recipe_ids))
        .find_also_related(ingredient::Entity)
        .all(db)
        .await?;

    let mut totals: BTreeMap<i32, ShoppingListLine> = BTreeMap::new();
    for (line, ingredient) in lines {
        let ingredient =
            ingredient.ok_or_else(|| CoreError::not_found("ingredient", line.ingredient_id))?;
        totals
            .entry(ingredient.id)
            .and_modify(|total| total.amount += i64::from(line.amount))
            .or_insert_with(|| ShoppingListLine {
                ingredient_id: ingredient.id,
                name: ingredient.name.clone(),
                measurement_unit: ingredient.measurement_unit.clone(),
                amount: i64::from(line.amount),
            });
    }

    let mut list: Vec<ShoppingListLine> = totals.into_values().collect();
    list.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.ingredient_id.cmp(&b.ingredient_id))
    });
    Ok(list)
}
