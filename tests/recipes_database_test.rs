// ABOUTME: Integration tests for the recipe store
// ABOUTME: Covers create/update/delete transactions, validation, and listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{create_test_database, draft, entry, seed_ingredient, seed_tag, seed_user};
use mealshare::database::recipes::RecipeListFilter;
use mealshare::database::{CartManager, FavoriteManager, RecipeManager};
use mealshare::errors::ErrorCode;
use mealshare::pagination::PaginationParams;
use uuid::Uuid;

#[tokio::test]
async fn test_create_recipe_hydrates_ingredients_and_tags() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let milk = seed_ingredient(&db, "Milk", "ml").await;
    let breakfast = seed_tag(&db, "Breakfast", "breakfast").await;

    let manager = RecipeManager::new(db.pool().clone());
    let recipe = manager
        .create_recipe(
            author.id,
            &draft(
                "Pancakes",
                vec![entry(flour.id, 200), entry(milk.id, 300)],
                vec![breakfast.id],
            ),
        )
        .await
        .unwrap();

    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.author_id, author.id);
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].name, "Flour");
    assert_eq!(recipe.ingredients[0].measurement_unit, "g");
    assert_eq!(recipe.ingredients[0].amount, 200);
    assert_eq!(recipe.ingredients[1].name, "Milk");
    assert_eq!(recipe.tags.len(), 1);
    assert_eq!(recipe.tags[0].slug, "breakfast");
}

#[tokio::test]
async fn test_create_recipe_rejects_empty_ingredient_list() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;

    let manager = RecipeManager::new(db.pool().clone());
    let err = manager
        .create_recipe(author.id, &draft("Air soup", vec![], vec![]))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert_eq!(err.code.http_status(), 400);
}

#[tokio::test]
async fn test_create_recipe_rejects_duplicate_ingredient_by_name() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let manager = RecipeManager::new(db.pool().clone());
    let err = manager
        .create_recipe(
            author.id,
            &draft(
                "Double flour",
                vec![entry(flour.id, 100), entry(flour.id, 200)],
                vec![],
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("Flour"), "message: {}", err.message);
}

#[tokio::test]
async fn test_create_recipe_rejects_out_of_range_values() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let manager = RecipeManager::new(db.pool().clone());

    let mut zero_time = draft("Instant", vec![entry(flour.id, 100)], vec![]);
    zero_time.cooking_time = 0;
    let err = manager.create_recipe(author.id, &zero_time).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    let err = manager
        .create_recipe(author.id, &draft("Nothing", vec![entry(flour.id, 0)], vec![]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

#[tokio::test]
async fn test_create_recipe_rejects_unknown_references() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let manager = RecipeManager::new(db.pool().clone());

    let err = manager
        .create_recipe(author.id, &draft("Ghost", vec![entry(Uuid::new_v4(), 5)], vec![]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = manager
        .create_recipe(
            author.id,
            &draft("Untagged", vec![entry(flour.id, 5)], vec![Uuid::new_v4()]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.code.http_status(), 404);
}

#[tokio::test]
async fn test_failed_create_persists_nothing() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let manager = RecipeManager::new(db.pool().clone());

    // Second ingredient id is unknown, so the whole create must roll back
    manager
        .create_recipe(
            author.id,
            &draft(
                "Half real",
                vec![entry(flour.id, 100), entry(Uuid::new_v4(), 50)],
                vec![],
            ),
        )
        .await
        .unwrap_err();

    let (recipes, total) = manager
        .list_recipes(&RecipeListFilter::default(), &PaginationParams::default())
        .await
        .unwrap();
    assert!(recipes.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_update_replaces_ingredient_set() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let milk = seed_ingredient(&db, "Milk", "ml").await;
    let egg = seed_ingredient(&db, "Egg", "pcs").await;

    let manager = RecipeManager::new(db.pool().clone());
    let recipe = manager
        .create_recipe(
            author.id,
            &draft("Pancakes", vec![entry(flour.id, 200), entry(milk.id, 300)], vec![]),
        )
        .await
        .unwrap();

    let updated = manager
        .update_recipe(
            recipe.id,
            author.id,
            &draft("Pancakes v2", vec![entry(egg.id, 3)], vec![]),
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Pancakes v2");
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].name, "Egg");
    assert_eq!(updated.ingredients[0].amount, 3);
}

#[tokio::test]
async fn test_update_with_empty_tags_keeps_existing_tags() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let breakfast = seed_tag(&db, "Breakfast", "breakfast").await;
    let dinner = seed_tag(&db, "Dinner", "dinner").await;

    let manager = RecipeManager::new(db.pool().clone());
    let recipe = manager
        .create_recipe(
            author.id,
            &draft("Pancakes", vec![entry(flour.id, 200)], vec![breakfast.id]),
        )
        .await
        .unwrap();

    // No tags in the draft: the existing tag set stays
    let updated = manager
        .update_recipe(
            recipe.id,
            author.id,
            &draft("Pancakes", vec![entry(flour.id, 250)], vec![]),
        )
        .await
        .unwrap();
    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.tags[0].slug, "breakfast");

    // Non-empty tags: the set is replaced
    let updated = manager
        .update_recipe(
            recipe.id,
            author.id,
            &draft("Pancakes", vec![entry(flour.id, 250)], vec![dinner.id]),
        )
        .await
        .unwrap();
    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.tags[0].slug, "dinner");
}

#[tokio::test]
async fn test_update_and_delete_require_authorship() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let stranger = seed_user(&db, "bob").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let manager = RecipeManager::new(db.pool().clone());
    let recipe = manager
        .create_recipe(author.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();

    let err = manager
        .update_recipe(
            recipe.id,
            stranger.id,
            &draft("Stolen", vec![entry(flour.id, 1)], vec![]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
    assert_eq!(err.code.http_status(), 403);

    let err = manager.delete_recipe(recipe.id, stranger.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    // Unknown recipe id is a 404, not a permission problem
    let err = manager.delete_recipe(Uuid::new_v4(), author.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_cascades_to_join_rows_and_memberships() {
    let db = create_test_database().await;
    let author = seed_user(&db, "alice").await;
    let fan = seed_user(&db, "bob").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let manager = RecipeManager::new(db.pool().clone());
    let recipe = manager
        .create_recipe(author.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();

    let favorites = FavoriteManager::new(db.pool().clone());
    let cart = CartManager::new(db.pool().clone());
    favorites.add(fan.id, recipe.id).await.unwrap();
    cart.add(fan.id, recipe.id).await.unwrap();

    manager.delete_recipe(recipe.id, author.id).await.unwrap();

    assert!(manager.get_recipe(recipe.id).await.unwrap().is_none());
    assert!(!favorites.contains(fan.id, recipe.id).await.unwrap());
    assert!(!cart.contains(fan.id, recipe.id).await.unwrap());
}

#[tokio::test]
async fn test_list_recipes_newest_first_with_filters() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let breakfast = seed_tag(&db, "Breakfast", "breakfast").await;

    let manager = RecipeManager::new(db.pool().clone());
    let pancakes = manager
        .create_recipe(
            alice.id,
            &draft("Pancakes", vec![entry(flour.id, 200)], vec![breakfast.id]),
        )
        .await
        .unwrap();
    let bread = manager
        .create_recipe(bob.id, &draft("Bread", vec![entry(flour.id, 500)], vec![]))
        .await
        .unwrap();

    let (all, total) = manager
        .list_recipes(&RecipeListFilter::default(), &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(all[0].id, bread.id, "newest first");
    assert_eq!(all[1].id, pancakes.id);

    let filter = RecipeListFilter {
        author: Some(alice.id),
        ..RecipeListFilter::default()
    };
    let (by_alice, total) = manager
        .list_recipes(&filter, &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(by_alice[0].id, pancakes.id);

    let filter = RecipeListFilter {
        tag_slugs: vec!["breakfast".to_owned()],
        ..RecipeListFilter::default()
    };
    let (tagged, _) = manager
        .list_recipes(&filter, &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id, pancakes.id);
}

#[tokio::test]
async fn test_list_recipes_membership_filters() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let manager = RecipeManager::new(db.pool().clone());
    let pancakes = manager
        .create_recipe(alice.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();
    let bread = manager
        .create_recipe(alice.id, &draft("Bread", vec![entry(flour.id, 500)], vec![]))
        .await
        .unwrap();

    FavoriteManager::new(db.pool().clone())
        .add(bob.id, pancakes.id)
        .await
        .unwrap();
    CartManager::new(db.pool().clone())
        .add(bob.id, bread.id)
        .await
        .unwrap();

    let filter = RecipeListFilter {
        favorited_by: Some(bob.id),
        ..RecipeListFilter::default()
    };
    let (favorited, _) = manager
        .list_recipes(&filter, &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(favorited.len(), 1);
    assert_eq!(favorited[0].id, pancakes.id);

    let filter = RecipeListFilter {
        in_cart_of: Some(bob.id),
        ..RecipeListFilter::default()
    };
    let (in_cart, _) = manager
        .list_recipes(&filter, &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(in_cart.len(), 1);
    assert_eq!(in_cart[0].id, bread.id);
}

#[tokio::test]
async fn test_list_recipes_pagination() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let manager = RecipeManager::new(db.pool().clone());
    for i in 0..8 {
        manager
            .create_recipe(
                alice.id,
                &draft(&format!("Recipe {i}"), vec![entry(flour.id, 100)], vec![]),
            )
            .await
            .unwrap();
    }

    let params = PaginationParams {
        page: Some(1),
        limit: Some(3),
    };
    let (first_page, total) = manager
        .list_recipes(&RecipeListFilter::default(), &params)
        .await
        .unwrap();
    assert_eq!(total, 8);
    assert_eq!(first_page.len(), 3);

    let params = PaginationParams {
        page: Some(3),
        limit: Some(3),
    };
    let (last_page, _) = manager
        .list_recipes(&RecipeListFilter::default(), &params)
        .await
        .unwrap();
    assert_eq!(last_page.len(), 2);

    // No overlap between pages
    assert!(first_page
        .iter()
        .all(|r| last_page.iter().all(|l| l.id != r.id)));
}
