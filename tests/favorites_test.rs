// ABOUTME: Integration tests for the favorites store
// ABOUTME: Covers add/remove toggles, duplicates, and per-user isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{create_test_database, draft, entry, seed_ingredient, seed_user};
use mealshare::database::{FavoriteManager, RecipeManager};
use mealshare::errors::ErrorCode;

#[tokio::test]
async fn test_favorite_toggle_roundtrip() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let recipes = RecipeManager::new(db.pool().clone());
    let recipe = recipes
        .create_recipe(alice.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();

    let favorites = FavoriteManager::new(db.pool().clone());
    let summary = favorites.add(bob.id, recipe.id).await.unwrap();
    assert_eq!(summary.id, recipe.id);
    assert!(favorites.contains(bob.id, recipe.id).await.unwrap());

    assert!(favorites.remove(bob.id, recipe.id).await.unwrap());
    assert!(!favorites.contains(bob.id, recipe.id).await.unwrap());

    // Removing again finds nothing to remove
    assert!(!favorites.remove(bob.id, recipe.id).await.unwrap());
}

#[tokio::test]
async fn test_favorite_duplicate_add_fails() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let recipes = RecipeManager::new(db.pool().clone());
    let recipe = recipes
        .create_recipe(alice.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();

    let favorites = FavoriteManager::new(db.pool().clone());
    favorites.add(alice.id, recipe.id).await.unwrap();

    let err = favorites.add(alice.id, recipe.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_favorites_are_per_user() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let recipes = RecipeManager::new(db.pool().clone());
    let recipe = recipes
        .create_recipe(alice.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();

    let favorites = FavoriteManager::new(db.pool().clone());
    favorites.add(alice.id, recipe.id).await.unwrap();

    assert!(favorites.contains(alice.id, recipe.id).await.unwrap());
    assert!(!favorites.contains(bob.id, recipe.id).await.unwrap());
}
