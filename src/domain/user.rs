//! User projection

use crate::error::CoreResult;
use crate::infrastructure::database::entities::{recipe, user};
use crate::operations::{follows, users};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

/// User info as seen by a specific viewer
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub uuid: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the viewer follows this user
    pub is_subscribed: bool,
    pub recipes_count: u64,
}

impl UserProfile {
    pub fn from_parts(user: user::Model, is_subscribed: bool, recipes_count: u64) -> Self {
        Self {
            id: user.id,
            uuid: user.uuid,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
            recipes_count,
        }
    }

    /// Load a user's profile as seen by `viewer` (None for anonymous).
    /// `is_subscribed` is false for anonymous viewers and for self-views.
    pub async fn load(
        db: &DatabaseConnection,
        viewer: Option<i32>,
        user_id: i32,
    ) -> CoreResult<Self> {
        let user = users::get_user(db, user_id).await?;
        let is_subscribed = match viewer {
            Some(viewer_id) if viewer_id != user_id => {
                follows::is_following(db, viewer_id, user_id).await?
            }
            _ => false,
        };
        let recipes_count = recipe::Entity::find()
            .filter(recipe::Column::AuthorId.eq(user_id))
            .count(db)
            .await?;
        Ok(Self::from_parts(user, is_subscribed, recipes_count))
    }
}
