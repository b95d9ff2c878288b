//! Ingredient reference data: search and bulk import

use crate::error::{CoreError, CoreResult};
use crate::infrastructure::database::entities::ingredient;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// Create a single ingredient
pub async fn create(db: &DatabaseConnection, input: NewIngredient) -> CoreResult<ingredient::Model> {
    validate(&input)?;
    let model = ingredient::ActiveModel {
        name: Set(input.name),
        measurement_unit: Set(input.measurement_unit),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Fetch an ingredient by id
pub async fn get(db: &DatabaseConnection, ingredient_id: i32) -> CoreResult<ingredient::Model> {
    ingredient::Entity::find_by_id(ingredient_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::not_found("ingredient", ingredient_id))
}

/// List all ingredients ordered by name
pub async fn list(db: &DatabaseConnection) -> CoreResult<Vec<ingredient::Model>> {
    Ok(ingredient::Entity::find()
        .order_by_asc(ingredient::Column::Name)
        .all(db)
        .await?)
}

/// Case-insensitive prefix search on the ingredient name
pub async fn search(db: &DatabaseConnection, prefix: &str) -> CoreResult<Vec<ingredient::Model>> {
    Ok(ingredient::Entity::find()
        .filter(ingredient::Column::Name.starts_with(prefix))
        .order_by_asc(ingredient::Column::Name)
        .all(db)
        .await?)
}

/// Offline bulk loader for the ingredient reference table.
///
/// Runs in one transaction, skips rows whose (name, unit) pair is already
/// present, and returns the number of rows actually inserted. Re-importing
/// the same data is a no-op.
pub async fn import_ingredients(
    db: &DatabaseConnection,
    rows: Vec<NewIngredient>,
) -> CoreResult<usize> {
    for row in &rows {
        validate(row)?;
    }

    let txn = db.begin().await?;
    let mut inserted = 0usize;

    for row in rows {
        let existing = ingredient::Entity::find()
            .filter(ingredient::Column::Name.eq(row.name.as_str()))
            .filter(ingredient::Column::MeasurementUnit.eq(row.measurement_unit.as_str()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            continue;
        }

        ingredient::ActiveModel {
            name: Set(row.name),
            measurement_unit: Set(row.measurement_unit),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        inserted += 1;
    }

    txn.commit().await?;
    info!(inserted, "imported ingredients");
    Ok(inserted)
}

fn validate(input: &NewIngredient) -> CoreResult<()> {
    if input.name.trim().is_empty() {
        return Err(CoreError::validation("name", "must not be empty"));
    }
    if input.measurement_unit.trim().is_empty() {
        return Err(CoreError::validation("measurement_unit", "must not be empty"));
    }
    Ok(())
}
