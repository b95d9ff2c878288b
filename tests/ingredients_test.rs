//! Ingredient reference data, user registration, and recipe views

mod helpers;

use helpers::{line, recipe_input, seed_ingredient, seed_tag, seed_user, test_db};
use tastebook_core::domain::RecipeView;
use tastebook_core::operations::{cart, favorites, ingredients, recipes, tags, users};
use tastebook_core::CoreError;

fn row(name: &str, unit: &str) -> ingredients::NewIngredient {
    ingredients::NewIngredient {
        name: name.to_string(),
        measurement_unit: unit.to_string(),
    }
}

#[tokio::test]
async fn search_matches_name_prefix_case_insensitively() {
    let tdb = test_db().await;
    let db = tdb.conn();
    seed_ingredient(db, "Salt", "g").await;
    seed_ingredient(db, "Saffron", "g").await;
    seed_ingredient(db, "Pepper", "g").await;

    let hits = ingredients::search(db, "sa").await.unwrap();
    let names: Vec<&str> = hits.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Saffron", "Salt"]);
}

#[tokio::test]
async fn import_skips_existing_rows() {
    let tdb = test_db().await;
    let db = tdb.conn();

    let inserted = ingredients::import_ingredients(
        db,
        vec![row("Salt", "g"), row("Pepper", "g"), row("Salt", "tsp")],
    )
    .await
    .unwrap();
    assert_eq!(inserted, 3);

    // Re-importing the same data is a no-op
    let inserted = ingredients::import_ingredients(db, vec![row("Salt", "g"), row("Pepper", "g")])
        .await
        .unwrap();
    assert_eq!(inserted, 0);

    assert_eq!(ingredients::list(db).await.unwrap().len(), 3);
}

#[tokio::test]
async fn import_rejects_empty_names() {
    let tdb = test_db().await;
    let db = tdb.conn();

    let err = ingredients::import_ingredients(db, vec![row("", "g")])
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { field: "name", .. }));
    assert!(ingredients::list(db).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_email_and_tag_slug_conflict() {
    let tdb = test_db().await;
    let db = tdb.conn();
    seed_user(db, "alice@example.com", "alice").await;

    let err = users::register(
        db,
        users::NewUser {
            email: "alice@example.com".to_string(),
            username: "alice2".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Again".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));

    seed_tag(db, "Dinner", "dinner").await;
    let err = tags::create(
        db,
        tags::NewTag {
            name: "Supper".to_string(),
            color: "#000000".to_string(),
            slug: "dinner".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));
}

#[tokio::test]
async fn recipe_view_computes_viewer_flags_explicitly() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let author = seed_user(db, "alice@example.com", "alice").await;
    let fan = seed_user(db, "bob@example.com", "bob").await;
    let salt = seed_ingredient(db, "Salt", "g").await;
    let dinner = seed_tag(db, "Dinner", "dinner").await;

    let recipe = recipes::create_recipe(
        db,
        author.id,
        recipe_input("Steak", vec![line(salt.id, 5)], vec![dinner.id]),
    )
    .await
    .unwrap();
    favorites::add_favorite(db, fan.id, recipe.id).await.unwrap();
    cart::add_to_cart(db, fan.id, recipe.id).await.unwrap();

    let fan_view = RecipeView::load(db, Some(fan.id), recipe.id).await.unwrap();
    assert!(fan_view.is_favorited);
    assert!(fan_view.is_in_shopping_cart);
    assert_eq!(fan_view.ingredients.len(), 1);
    assert_eq!(fan_view.ingredients[0].name, "Salt");
    assert_eq!(fan_view.ingredients[0].amount, 5);
    assert_eq!(fan_view.tags.len(), 1);
    assert_eq!(fan_view.tags[0].slug, "dinner");
    assert_eq!(fan_view.author.id, author.id);

    let anonymous_view = RecipeView::load(db, None, recipe.id).await.unwrap();
    assert!(!anonymous_view.is_favorited);
    assert!(!anonymous_view.is_in_shopping_cart);
}
