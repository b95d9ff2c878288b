//! Tag reference data

use crate::error::{map_unique_violation, CoreError, CoreResult};
use crate::infrastructure::database::entities::tag;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Create a tag. Slug must be unique across all tags.
pub async fn create(db: &DatabaseConnection, input: NewTag) -> CoreResult<tag::Model> {
    if input.name.trim().is_empty() {
        return Err(CoreError::validation("name", "must not be empty"));
    }
    if input.slug.trim().is_empty() {
        return Err(CoreError::validation("slug", "must not be empty"));
    }

    let conflict = format!("tag slug {} is already taken", input.slug);
    let model = tag::ActiveModel {
        name: Set(input.name),
        color: Set(input.color),
        slug: Set(input.slug),
        ..Default::default()
    };
    model
        .insert(db)
        .await
        .map_err(|e| map_unique_violation(e, conflict))
}

/// Fetch a tag by id
pub async fn get(db: &DatabaseConnection, tag_id: i32) -> CoreResult<tag::Model> {
    tag::Entity::find_by_id(tag_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::not_found("tag", tag_id))
}

/// Fetch a tag by slug
pub async fn get_by_slug(db: &DatabaseConnection, slug: &str) -> CoreResult<tag::Model> {
    tag::Entity::find()
        .filter(tag::Column::Slug.eq(slug))
        .one(db)
        .await?
        .ok_or_else(|| CoreError::not_found("tag", slug))
}

/// List all tags
pub async fn list(db: &DatabaseConnection) -> CoreResult<Vec<tag::Model>> {
    Ok(tag::Entity::find()
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await?)
}
