//! Favorite toggler
//!
//! A favorite is a two-state existence flag per (user, recipe) pair. Adding
//! reports a conflict when the pair is already present so callers can tell
//! "already bookmarked" apart from "newly bookmarked".

use crate::error::{map_unique_violation, CoreError, CoreResult};
use crate::infrastructure::database::entities::favorite;
use crate::operations::recipes;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use tracing::info;

/// Bookmark a recipe for a user
pub async fn add_favorite(
    db: &DatabaseConnection,
    user_id: i32,
    recipe_id: i32,
) -> CoreResult<favorite::Model> {
    recipes::get_recipe(db, recipe_id).await?;

    let existing = favorite::Entity::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::RecipeId.eq(recipe_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(CoreError::conflict(format!(
            "recipe {} is already in the favorites of user {}",
            recipe_id, user_id
        )));
    }

    let conflict = format!(
        "recipe {} is already in the favorites of user {}",
        recipe_id, user_id
    );
    let created = favorite::ActiveModel {
        user_id: Set(user_id),
        recipe_id: Set(recipe_id),
        ..favorite::ActiveModel::new()
    }
    .insert(db)
    .await
    .map_err(|e| map_unique_violation(e, conflict))?;

    info!(user_id, recipe_id, "added favorite");
    Ok(created)
}

/// Remove a bookmark; the pair must exist
pub async fn remove_favorite(
    db: &DatabaseConnection,
    user_id: i32,
    recipe_id: i32,
) -> CoreResult<()> {
    let result = favorite::Entity::delete_many()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::RecipeId.eq(recipe_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(CoreError::not_found(
            "favorite",
            format!("(user {}, recipe {})", user_id, recipe_id),
        ));
    }

    info!(user_id, recipe_id, "removed favorite");
    Ok(())
}

/// Whether a user has favorited a recipe; used by projections
pub async fn is_favorited(
    db: &DatabaseConnection,
    user_id: i32,
    recipe_id: i32,
) -> CoreResult<bool> {
    let count = favorite::Entity::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::RecipeId.eq(recipe_id))
        .count(db)
        .await?;
    Ok(count > 0)
}
