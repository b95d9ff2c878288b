//! Subscription graph: follow/unfollow rules and the following projection

mod helpers;

use helpers::{line, recipe_input, seed_ingredient, seed_tag, seed_user, test_db};
use tastebook_core::domain::UserProfile;
use tastebook_core::operations::{follows, recipes};
use tastebook_core::CoreError;

#[tokio::test]
async fn self_follow_is_rejected() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let alice = seed_user(db, "alice@example.com", "alice").await;

    let err = follows::follow(db, alice.id, alice.id).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { field: "author", .. }));
}

#[tokio::test]
async fn duplicate_follow_conflicts() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let alice = seed_user(db, "alice@example.com", "alice").await;
    let bob = seed_user(db, "bob@example.com", "bob").await;

    follows::follow(db, alice.id, bob.id).await.unwrap();
    let err = follows::follow(db, alice.id, bob.id).await.unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));
}

#[tokio::test]
async fn unfollow_missing_edge_reports_not_found() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let alice = seed_user(db, "alice@example.com", "alice").await;
    let bob = seed_user(db, "bob@example.com", "bob").await;

    let err = follows::unfollow(db, alice.id, bob.id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));

    follows::follow(db, alice.id, bob.id).await.unwrap();
    follows::unfollow(db, alice.id, bob.id).await.unwrap();
    let err = follows::unfollow(db, alice.id, bob.id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

#[tokio::test]
async fn follow_unknown_author_reports_not_found() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let alice = seed_user(db, "alice@example.com", "alice").await;

    let err = follows::follow(db, alice.id, 4242).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "user", .. }));
}

#[tokio::test]
async fn list_following_projects_flag_and_recipe_count() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let alice = seed_user(db, "alice@example.com", "alice").await;
    let bob = seed_user(db, "bob@example.com", "bob").await;
    let carol = seed_user(db, "carol@example.com", "carol").await;
    let salt = seed_ingredient(db, "Salt", "g").await;
    let dinner = seed_tag(db, "Dinner", "dinner").await;

    recipes::create_recipe(
        db,
        bob.id,
        recipe_input("Steak", vec![line(salt.id, 5)], vec![dinner.id]),
    )
    .await
    .unwrap();

    follows::follow(db, alice.id, carol.id).await.unwrap();
    follows::follow(db, alice.id, bob.id).await.unwrap();

    let following = follows::list_following(db, alice.id).await.unwrap();
    assert_eq!(following.len(), 2);
    // Ordered by author id regardless of follow order
    assert_eq!(following[0].id, bob.id);
    assert_eq!(following[1].id, carol.id);
    assert!(following.iter().all(|profile| profile.is_subscribed));
    assert_eq!(following[0].recipes_count, 1);
    assert_eq!(following[1].recipes_count, 0);
}

#[tokio::test]
async fn user_profile_flag_depends_on_viewer() {
    let tdb = test_db().await;
    let db = tdb.conn();
    let alice = seed_user(db, "alice@example.com", "alice").await;
    let bob = seed_user(db, "bob@example.com", "bob").await;

    follows::follow(db, alice.id, bob.id).await.unwrap();

    let seen_by_alice = UserProfile::load(db, Some(alice.id), bob.id).await.unwrap();
    assert!(seen_by_alice.is_subscribed);

    let seen_by_bob = UserProfile::load(db, Some(bob.id), alice.id).await.unwrap();
    assert!(!seen_by_bob.is_subscribed);

    let seen_anonymously = UserProfile::load(db, None, bob.id).await.unwrap();
    assert!(!seen_anonymously.is_subscribed);

    let self_view = UserProfile::load(db, Some(bob.id), bob.id).await.unwrap();
    assert!(!self_view.is_subscribed);
}
