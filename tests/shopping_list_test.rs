//! Shopping-list aggregation across the cart

mod helpers;

use helpers::{line, recipe_input, seed_ingredient, seed_tag, seed_user, test_db};
use tastebook_core::operations::{cart, recipes};

#[tokio::test]
async fn sums_amounts_grouped_by_ingredient() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let author = seed_user(db, "alice@example.com", "alice").await;
    let shopper = seed_user(db, "bob@example.com", "bob").await;
    let salt = seed_ingredient(db, "Salt", "g").await;
    let pepper = seed_ingredient(db, "Pepper", "g").await;
    let dinner = seed_tag(db, "Dinner", "dinner").await;

    // Recipe A: Salt 5; Recipe B: Salt 10 + Pepper 2
    let a = recipes::create_recipe(
        db,
        author.id,
        recipe_input("Steak", vec![line(salt.id, 5)], vec![dinner.id]),
    )
    .await
    .unwrap();
    let b = recipes::create_recipe(
        db,
        author.id,
        recipe_input(
            "Soup",
            vec![line(salt.id, 10), line(pepper.id, 2)],
            vec![dinner.id],
        ),
    )
    .await
    .unwrap();

    cart::add_to_cart(db, shopper.id, a.id).await.unwrap();
    cart::add_to_cart(db, shopper.id, b.id).await.unwrap();

    let list = cart::shopping_list(db, shopper.id).await.unwrap();
    assert_eq!(list.len(), 2);

    // Sorted by name: Pepper before Salt
    assert_eq!(list[0].name, "Pepper");
    assert_eq!(list[0].measurement_unit, "g");
    assert_eq!(list[0].amount, 2);
    assert_eq!(list[1].name, "Salt");
    assert_eq!(list[1].measurement_unit, "g");
    assert_eq!(list[1].amount, 15);
}

#[tokio::test]
async fn empty_cart_yields_empty_list() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let shopper = seed_user(db, "bob@example.com", "bob").await;

    let list = cart::shopping_list(db, shopper.id).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn groups_by_ingredient_identity_not_display_name() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let author = seed_user(db, "alice@example.com", "alice").await;
    let shopper = seed_user(db, "bob@example.com", "bob").await;
    // Two distinct ingredients sharing a display name
    let salt_g = seed_ingredient(db, "Salt", "g").await;
    let salt_tsp = seed_ingredient(db, "Salt", "tsp").await;
    let dinner = seed_tag(db, "Dinner", "dinner").await;

    let recipe = recipes::create_recipe(
        db,
        author.id,
        recipe_input(
            "Brine",
            vec![line(salt_g.id, 100), line(salt_tsp.id, 3)],
            vec![dinner.id],
        ),
    )
    .await
    .unwrap();
    cart::add_to_cart(db, shopper.id, recipe.id).await.unwrap();

    let list = cart::shopping_list(db, shopper.id).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].name, "Salt");
    assert_eq!(list[1].name, "Salt");
    assert_ne!(list[0].ingredient_id, list[1].ingredient_id);
    // Tiebreak on ingredient id keeps the order stable
    assert!(list[0].ingredient_id < list[1].ingredient_id);
}

#[tokio::test]
async fn aggregation_is_a_pure_read() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let author = seed_user(db, "alice@example.com", "alice").await;
    let shopper = seed_user(db, "bob@example.com", "bob").await;
    let salt = seed_ingredient(db, "Salt", "g").await;
    let dinner = seed_tag(db, "Dinner", "dinner").await;

    let recipe = recipes::create_recipe(
        db,
        author.id,
        recipe_input("Steak", vec![line(salt.id, 5)], vec![dinner.id]),
    )
    .await
    .unwrap();
    cart::add_to_cart(db, shopper.id, recipe.id).await.unwrap();

    let first = cart::shopping_list(db, shopper.id).await.unwrap();
    let second = cart::shopping_list(db, shopper.id).await.unwrap();
    assert_eq!(first, second);
}
