//! Recipe projection

use crate::domain::user::UserProfile;
use crate::error::{CoreError, CoreResult};
use crate::infrastructure::database::entities::{ingredient, recipe_ingredient, tag};
use crate::operations::{cart, favorites, recipes};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

/// One ingredient line of a recipe, joined with its reference data
#[derive(Debug, Clone, Serialize)]
pub struct IngredientLine {
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Full recipe view as seen by a specific viewer
#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: i32,
    pub uuid: Uuid,
    pub author: UserProfile,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientLine>,
    pub tags: Vec<tag::Model>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub pub_date: chrono::DateTime<chrono::Utc>,
}

impl RecipeView {
    /// Load a recipe with its associations and viewer-dependent flags.
    /// Anonymous viewers get both flags as false.
    pub async fn load(
        db: &DatabaseConnection,
        viewer: Option<i32>,
        recipe_id: i32,
    ) -> CoreResult<Self> {
        let recipe = recipes::get_recipe(db, recipe_id).await?;
        let author = UserProfile::load(db, viewer, recipe.author_id).await?;

        let mut ingredients = Vec::new();
        let lines = recipe_ingredient::Entity::find()
            .filter(recipe_ingredient::Column::RecipeId.eq(recipe.id))
            .find_also_related(ingredient::Entity)
            .all(db)
            .await?;
        for (line, ingredient) in lines {
            let ingredient =
                ingredient.ok_or_else(|| CoreError::not_found("ingredient", line.ingredient_id))?;
            ingredients.push(IngredientLine {
                ingredient_id: ingredient.id,
                name: ingredient.name,
                measurement_unit: ingredient.measurement_unit,
                amount: line.amount,
            });
        }

        let tags = recipe.find_related(tag::Entity).all(db).await?;

        let (is_favorited, is_in_shopping_cart) = match viewer {
            Some(viewer_id) => (
                favorites::is_favorited(db, viewer_id, recipe.id).await?,
                cart::is_in_cart(db, viewer_id, recipe.id).await?,
            ),
            None => (false, false),
        };

        Ok(Self {
            id: recipe.id,
            uuid: recipe.uuid,
            author,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            ingredients,
            tags,
            is_favorited,
            is_in_shopping_cart,
            pub_date: recipe.pub_date,
        })
    }
}
