//! User registration and lookup

use crate::error::{map_unique_violation, CoreError, CoreResult};
use crate::infrastructure::database::entities::user;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    Set,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Register a new user. Email must be unique across all users.
pub async fn register<C: ConnectionTrait>(db: &C, input: NewUser) -> CoreResult<user::Model> {
    if input.email.trim().is_empty() {
        return Err(CoreError::validation("email", "must not be empty"));
    }
    if input.username.trim().is_empty() {
        return Err(CoreError::validation("username", "must not be empty"));
    }

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(input.email.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(CoreError::conflict(format!(
            "email {} is already registered",
            input.email
        )));
    }

    let conflict = format!("email {} is already registered", input.email);
    let model = user::ActiveModel {
        email: Set(input.email),
        username: Set(input.username),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        ..user::ActiveModel::new()
    };
    let created = model
        .insert(db)
        .await
        .map_err(|e| map_unique_violation(e, conflict))?;

    info!(user_id = created.id, "registered user");
    Ok(created)
}

/// Fetch a user by primary id
pub async fn get_user<C: ConnectionTrait>(db: &C, user_id: i32) -> CoreResult<user::Model> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::not_found("user", user_id))
}

/// Fetch a user by public uuid
pub async fn get_user_by_uuid<C: ConnectionTrait>(db: &C, uuid: Uuid) -> CoreResult<user::Model> {
    user::Entity::find()
        .filter(user::Column::Uuid.eq(uuid))
        .one(db)
        .await?
        .ok_or_else(|| CoreError::not_found("user", uuid))
}
