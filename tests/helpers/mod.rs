//! Shared test fixtures: temp-dir database plus seed data

#![allow(dead_code)]

use sea_orm::DatabaseConnection;
use std::sync::Once;
use tastebook_core::infrastructure::database::entities::{ingredient, tag, user};
use tastebook_core::operations::{ingredients, recipes, tags, users};
use tastebook_core::Database;
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Route operation logs through the test writer; filter with RUST_LOG
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A migrated database backed by a temp directory. Keep the struct alive
/// for the duration of the test; dropping it deletes the directory.
pub struct TestDb {
    pub db: Database,
    _dir: TempDir,
}

impl TestDb {
    pub fn conn(&self) -> &DatabaseConnection {
        self.db.conn()
    }
}

pub async fn test_db() -> TestDb {
    init_tracing();
    let dir = TempDir::new().expect("create temp dir");
    let db = Database::create(&dir.path().join("tastebook.db"))
        .await
        .expect("create database");
    db.migrate().await.expect("run migrations");
    TestDb { db, _dir: dir }
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, username: &str) -> user::Model {
    users::register(
        db,
        users::NewUser {
            email: email.to_string(),
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        },
    )
    .await
    .expect("seed user")
}

pub async fn seed_ingredient(db: &DatabaseConnection, name: &str, unit: &str) -> ingredient::Model {
    ingredients::create(
        db,
        ingredients::NewIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        },
    )
    .await
    .expect("seed ingredient")
}

pub async fn seed_tag(db: &DatabaseConnection, name: &str, slug: &str) -> tag::Model {
    tags::create(
        db,
        tags::NewTag {
            name: name.to_string(),
            color: "#E26C2D".to_string(),
            slug: slug.to_string(),
        },
    )
    .await
    .expect("seed tag")
}

/// A minimal valid recipe input over the given ingredient lines and tags
pub fn recipe_input(
    name: &str,
    lines: Vec<recipes::IngredientAmount>,
    tag_ids: Vec<i32>,
) -> recipes::RecipeInput {
    recipes::RecipeInput {
        name: name.to_string(),
        image: format!("recipes/{}.png", name),
        text: format!("How to cook {}", name),
        cooking_time: 30,
        ingredients: lines,
        tags: tag_ids,
    }
}

pub fn line(ingredient_id: i32, amount: i32) -> recipes::IngredientAmount {
    recipes::IngredientAmount {
        ingredient_id,
        amount,
    }
}
