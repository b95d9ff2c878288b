//! Recipe composer: create, update, delete, and list recipes
//!
//! A recipe is assembled from scalar fields plus a set of (ingredient,
//! amount) lines and a set of tags. Assembly is all-or-nothing: every
//! referential check and row insert for one compose call happens inside a
//! single transaction, so a bad ingredient id midway leaves no partial rows.

use crate::error::{CoreError, CoreResult};
use crate::infrastructure::database::entities::{
    favorite, ingredient, recipe, recipe_ingredient, recipe_tag, shopping_list_entry, tag,
};
use crate::operations::users;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// One ingredient line of a recipe submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Full recipe submission
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeInput {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<i32>,
}

/// Partial recipe update. `ingredients` and `tags`, when present, replace
/// the whole association set rather than merging into it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub ingredients: Option<Vec<IngredientAmount>>,
    pub tags: Option<Vec<i32>>,
}

/// Listing filter, mirroring the catalogue views: by author, by tag slug,
/// by who favorited, by whose cart contains the recipe.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author_id: Option<i32>,
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<i32>,
    pub in_cart_of: Option<i32>,
}

/// Create a recipe with its ingredient and tag associations.
pub async fn create_recipe(
    db: &DatabaseConnection,
    author_id: i32,
    input: RecipeInput,
) -> CoreResult<recipe::Model> {
    if input.name.trim().is_empty() {
        return Err(CoreError::validation("name", "must not be empty"));
    }
    if input.cooking_time < 1 {
        return Err(CoreError::validation(
            "cooking_time",
            "must be at least one minute",
        ));
    }
    validate_ingredient_lines(&input.ingredients)?;
    let tag_ids = validate_tag_ids(&input.tags)?;

    users::get_user(db, author_id).await?;

    let txn = db.begin().await?;

    check_ingredients_exist(&txn, &input.ingredients).await?;
    check_tags_exist(&txn, &tag_ids).await?;

    let created = recipe::ActiveModel {
        author_id: Set(author_id),
        name: Set(input.name),
        image: Set(input.image),
        text: Set(input.text),
        cooking_time: Set(input.cooking_time),
        ..recipe::ActiveModel::new()
    }
    .insert(&txn)
    .await?;

    insert_ingredient_lines(&txn, created.id, &input.ingredients).await?;
    insert_tag_links(&txn, created.id, &tag_ids).await?;

    txn.commit().await?;

    info!(recipe_id = created.id, author_id, "created recipe");
    Ok(created)
}

/// Update a recipe. Only the author may edit; provided association sets
/// fully replace the stored ones under the same validation as create.
pub async fn update_recipe(
    db: &DatabaseConnection,
    recipe_id: i32,
    actor_id: i32,
    update: RecipeUpdate,
) -> CoreResult<recipe::Model> {
    let existing = get_recipe(db, recipe_id).await?;
    if existing.author_id != actor_id {
        return Err(CoreError::authorization(format!(
            "user {} is not the author of recipe {}",
            actor_id, recipe_id
        )));
    }

    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(CoreError::validation("name", "must not be empty"));
        }
    }
    if let Some(cooking_time) = update.cooking_time {
        if cooking_time < 1 {
            return Err(CoreError::validation(
                "cooking_time",
                "must be at least one minute",
            ));
        }
    }
    if let Some(lines) = &update.ingredients {
        validate_ingredient_lines(lines)?;
    }
    let tag_ids = match &update.tags {
        Some(tags) => Some(validate_tag_ids(tags)?),
        None => None,
    };

    let txn = db.begin().await?;

    if let Some(lines) = &update.ingredients {
        check_ingredients_exist(&txn, lines).await?;
        recipe_ingredient::Entity::delete_many()
            .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await?;
        insert_ingredient_lines(&txn, recipe_id, lines).await?;
    }

    if let Some(tag_ids) = &tag_ids {
        check_tags_exist(&txn, tag_ids).await?;
        recipe_tag::Entity::delete_many()
            .filter(recipe_tag::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await?;
        insert_tag_links(&txn, recipe_id, tag_ids).await?;
    }

    let mut active: recipe::ActiveModel = existing.into();
    let mut dirty = false;
    if let Some(name) = update.name {
        active.name = Set(name);
        dirty = true;
    }
    if let Some(image) = update.image {
        active.image = Set(image);
        dirty = true;
    }
    if let Some(text) = update.text {
        active.text = Set(text);
        dirty = true;
    }
    if let Some(cooking_time) = update.cooking_time {
        active.cooking_time = Set(cooking_time);
        dirty = true;
    }

    let updated = if dirty {
        active.update(&txn).await?
    } else {
        recipe::Entity::find_by_id(recipe_id)
            .one(&txn)
            .await?
            .ok_or_else(|| CoreError::not_found("recipe", recipe_id))?
    };

    txn.commit().await?;

    info!(recipe_id, actor_id, "updated recipe");
    Ok(updated)
}

/// Delete a recipe and everything referencing it. Only the author may
/// delete. The cascade (ingredient lines, tag links, favorites, cart
/// entries) runs in the same transaction as the recipe row removal, so
/// readers never see a half-deleted recipe.
pub async fn delete_recipe(
    db: &DatabaseConnection,
    recipe_id: i32,
    actor_id: i32,
) -> CoreResult<()> {
    let existing = get_recipe(db, recipe_id).await?;
    if existing.author_id != actor_id {
        return Err(CoreError::authorization(format!(
            "user {} is not the author of recipe {}",
            actor_id, recipe_id
        )));
    }

    let txn = db.begin().await?;

    recipe_ingredient::Entity::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .exec(&txn)
        .await?;
    recipe_tag::Entity::delete_many()
        .filter(recipe_tag::Column::RecipeId.eq(recipe_id))
        .exec(&txn)
        .await?;
    favorite::Entity::delete_many()
        .filter(favorite::Column::RecipeId.eq(recipe_id))
        .exec(&txn)
        .await?;
    shopping_list_entry::Entity::delete_many()
        .filter(shopping_list_entry::Column::RecipeId.eq(recipe_id))
        .exec(&txn)
        .await?;
    recipe::Entity::delete_by_id(recipe_id).exec(&txn).await?;

    txn.commit().await?;

    info!(recipe_id, actor_id, "deleted recipe");
    Ok(())
}

/// Fetch a recipe by id
pub async fn get_recipe(db: &DatabaseConnection, recipe_id: i32) -> CoreResult<recipe::Model> {
    recipe::Entity::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::not_found("recipe", recipe_id))
}

/// List recipes newest-first, optionally filtered
pub async fn list_recipes(
    db: &DatabaseConnection,
    filter: RecipeFilter,
) -> CoreResult<Vec<recipe::Model>> {
    let mut query = recipe::Entity::find();

    if let Some(author_id) = filter.author_id {
        query = query.filter(recipe::Column::AuthorId.eq(author_id));
    }

    if !filter.tag_slugs.is_empty() {
        let tag_ids: Vec<i32> = tag::Entity::find()
            .filter(tag::Column::Slug.is_in(filter.tag_slugs.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();
        let recipe_ids: Vec<i32> = recipe_tag::Entity::find()
            .filter(recipe_tag::Column::TagId.is_in(tag_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.recipe_id)
            .collect();
        query = query.filter(recipe::Column::Id.is_in(recipe_ids));
    }

    if let Some(user_id) = filter.favorited_by {
        let recipe_ids: Vec<i32> = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|f| f.recipe_id)
            .collect();
        query = query.filter(recipe::Column::Id.is_in(recipe_ids));
    }

    if let Some(user_id) = filter.in_cart_of {
        let recipe_ids: Vec<i32> = shopping_list_entry::Entity::find()
            .filter(shopping_list_entry::Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|e| e.recipe_id)
            .collect();
        query = query.filter(recipe::Column::Id.is_in(recipe_ids));
    }

    Ok(query
        .order_by_desc(recipe::Column::PubDate)
        .order_by_desc(recipe::Column::Id)
        .all(db)
        .await?)
}

fn validate_ingredient_lines(lines: &[IngredientAmount]) -> CoreResult<()> {
    if lines.is_empty() {
        return Err(CoreError::validation(
            "ingredients",
            "at least one ingredient is required",
        ));
    }
    let mut seen = HashSet::new();
    for line in lines {
        if line.amount < 1 {
            return Err(CoreError::validation(
                "amount",
                format!("ingredient {} needs an amount of at least 1", line.ingredient_id),
            ));
        }
        if !seen.insert(line.ingredient_id) {
            return Err(CoreError::validation(
                "ingredients",
                format!("ingredient {} is listed more than once", line.ingredient_id),
            ));
        }
    }
    Ok(())
}

fn validate_tag_ids(tags: &[i32]) -> CoreResult<Vec<i32>> {
    if tags.is_empty() {
        return Err(CoreError::validation("tags", "at least one tag is required"));
    }
    // Tags form a set; repeated ids collapse to one link
    let mut seen = HashSet::new();
    Ok(tags
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect())
}

async fn check_ingredients_exist<C: ConnectionTrait>(
    conn: &C,
    lines: &[IngredientAmount],
) -> CoreResult<()> {
    let ids: Vec<i32> = lines.iter().map(|l| l.ingredient_id).collect();
    let found: HashSet<i32> = ingredient::Entity::find()
        .filter(ingredient::Column::Id.is_in(ids.clone()))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| m.id)
        .collect();
    for id in ids {
        if !found.contains(&id) {
            return Err(CoreError::not_found("ingredient", id));
        }
    }
    Ok(())
}

async fn check_tags_exist<C: ConnectionTrait>(conn: &C, tag_ids: &[i32]) -> CoreResult<()> {
    let found: HashSet<i32> = tag::Entity::find()
        .filter(tag::Column::Id.is_in(tag_ids.to_vec()))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| m.id)
        .collect();
    for id in tag_ids {
        if !found.contains(id) {
            return Err(CoreError::not_found("tag", id));
        }
    }
    Ok(())
}

async fn insert_ingredient_lines<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    lines: &[IngredientAmount],
) -> CoreResult<()> {
    for line in lines {
        recipe_ingredient::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(line.ingredient_id),
            amount: Set(line.amount),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn insert_tag_links<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    tag_ids: &[i32],
) -> CoreResult<()> {
    for tag_id in tag_ids {
        recipe_tag::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(*tag_id),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}
