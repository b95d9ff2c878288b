//! Subscription graph: directed follow edges between users

use crate::domain::user::UserProfile;
use crate::error::{map_unique_violation, CoreError, CoreResult};
use crate::infrastructure::database::entities::{follow, recipe, user};
use crate::operations::users;
use futures::future::try_join_all;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// Follow an author. Self-follows are rejected; duplicate edges conflict.
pub async fn follow(
    db: &DatabaseConnection,
    user_id: i32,
    author_id: i32,
) -> CoreResult<follow::Model> {
    if user_id == author_id {
        return Err(CoreError::validation(
            "author",
            "users cannot follow themselves",
        ));
    }
    users::get_user(db, author_id).await?;

    let existing = follow::Entity::find()
        .filter(follow::Column::UserId.eq(user_id))
        .filter(follow::Column::AuthorId.eq(author_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(CoreError::conflict(format!(
            "user {} already follows user {}",
            user_id, author_id
        )));
    }

    let conflict = format!("user {} already follows user {}", user_id, author_id);
    let created = follow::ActiveModel {
        user_id: Set(user_id),
        author_id: Set(author_id),
        ..follow::ActiveModel::new()
    }
    .insert(db)
    .await
    .map_err(|e| map_unique_violation(e, conflict))?;

    info!(user_id, author_id, "followed author");
    Ok(created)
}

/// Remove a follow edge; the edge must exist
pub async fn unfollow(db: &DatabaseConnection, user_id: i32, author_id: i32) -> CoreResult<()> {
    let result = follow::Entity::delete_many()
        .filter(follow::Column::UserId.eq(user_id))
        .filter(follow::Column::AuthorId.eq(author_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(CoreError::not_found(
            "follow",
            format!("(user {}, author {})", user_id, author_id),
        ));
    }

    info!(user_id, author_id, "unfollowed author");
    Ok(())
}

/// Whether `user_id` follows `author_id`; used by projections
pub async fn is_following(
    db: &DatabaseConnection,
    user_id: i32,
    author_id: i32,
) -> CoreResult<bool> {
    let count = follow::Entity::find()
        .filter(follow::Column::UserId.eq(user_id))
        .filter(follow::Column::AuthorId.eq(author_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// List the authors a user follows, ordered by author id. Every entry is
/// followed by construction, so `is_subscribed` is always true here; the
/// flag is kept for symmetry with the general user projection.
pub async fn list_following(
    db: &DatabaseConnection,
    user_id: i32,
) -> CoreResult<Vec<UserProfile>> {
    let author_ids: Vec<i32> = follow::Entity::find()
        .filter(follow::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|edge| edge.author_id)
        .collect();

    let authors = user::Entity::find()
        .filter(user::Column::Id.is_in(author_ids))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;

    let counts = try_join_all(authors.iter().map(|author| {
        recipe::Entity::find()
            .filter(recipe::Column::AuthorId.eq(author.id))
            .count(db)
    }))
    .await?;

    Ok(authors
        .into_iter()
        .zip(counts)
        .map(|(author, recipes_count)| UserProfile::from_parts(author, true, recipes_count))
        .collect())
}
