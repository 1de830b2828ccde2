// ABOUTME: Integration tests for the shopping cart store and list report
// ABOUTME: Covers toggles, aggregation across recipes, and the empty-cart error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{create_test_database, draft, entry, seed_ingredient, seed_user};
use mealshare::database::{CartManager, RecipeManager};
use mealshare::errors::ErrorCode;
use mealshare::shopping_list;

#[tokio::test]
async fn test_cart_add_returns_summary_and_rejects_duplicates() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let recipes = RecipeManager::new(db.pool().clone());
    let recipe = recipes
        .create_recipe(alice.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();

    let cart = CartManager::new(db.pool().clone());
    let summary = cart.add(alice.id, recipe.id).await.unwrap();
    assert_eq!(summary.id, recipe.id);
    assert_eq!(summary.name, "Pancakes");

    let err = cart.add(alice.id, recipe.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.code.http_status(), 400);
}

#[tokio::test]
async fn test_cart_remove_reports_missing_membership() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let recipes = RecipeManager::new(db.pool().clone());
    let recipe = recipes
        .create_recipe(alice.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();

    let cart = CartManager::new(db.pool().clone());
    assert!(!cart.remove(alice.id, recipe.id).await.unwrap());

    cart.add(alice.id, recipe.id).await.unwrap();
    assert!(cart.contains(alice.id, recipe.id).await.unwrap());
    assert!(cart.remove(alice.id, recipe.id).await.unwrap());
    assert!(!cart.contains(alice.id, recipe.id).await.unwrap());
}

#[tokio::test]
async fn test_shopping_list_sums_shared_ingredients_across_recipes() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let milk = seed_ingredient(&db, "Milk", "ml").await;

    let recipes = RecipeManager::new(db.pool().clone());
    let pancakes = recipes
        .create_recipe(
            alice.id,
            &draft("Pancakes", vec![entry(flour.id, 200), entry(milk.id, 300)], vec![]),
        )
        .await
        .unwrap();
    let bread = recipes
        .create_recipe(alice.id, &draft("Bread", vec![entry(flour.id, 150)], vec![]))
        .await
        .unwrap();

    let cart = CartManager::new(db.pool().clone());
    cart.add(alice.id, pancakes.id).await.unwrap();
    cart.add(alice.id, bread.id).await.unwrap();

    let rows = cart.ingredient_rows(alice.id).await.unwrap();
    let report = shopping_list::build_report(&rows).unwrap();

    assert_eq!(report, "Flour - 350g\nMilk - 300ml\n");
}

#[tokio::test]
async fn test_shopping_list_preserves_first_encounter_order() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let milk = seed_ingredient(&db, "Milk", "ml").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;
    let egg = seed_ingredient(&db, "Egg", "pcs").await;

    let recipes = RecipeManager::new(db.pool().clone());
    let custard = recipes
        .create_recipe(
            alice.id,
            &draft("Custard", vec![entry(milk.id, 500), entry(egg.id, 4)], vec![]),
        )
        .await
        .unwrap();
    let dough = recipes
        .create_recipe(
            alice.id,
            &draft("Dough", vec![entry(flour.id, 300), entry(milk.id, 100)], vec![]),
        )
        .await
        .unwrap();

    let cart = CartManager::new(db.pool().clone());
    cart.add(alice.id, custard.id).await.unwrap();
    cart.add(alice.id, dough.id).await.unwrap();

    let rows = cart.ingredient_rows(alice.id).await.unwrap();
    let report = shopping_list::build_report(&rows).unwrap();

    // Milk first (first cart item, first ingredient), summed across both
    assert_eq!(report, "Milk - 600ml\nEgg - 4pcs\nFlour - 300g\n");
}

#[tokio::test]
async fn test_empty_cart_report_is_an_error() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;

    let cart = CartManager::new(db.pool().clone());
    let rows = cart.ingredient_rows(alice.id).await.unwrap();
    assert!(rows.is_empty());

    let err = shopping_list::build_report(&rows).unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyCart);
    assert_eq!(err.code.http_status(), 400);
}

#[tokio::test]
async fn test_carts_are_per_user() {
    let db = create_test_database().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let flour = seed_ingredient(&db, "Flour", "g").await;

    let recipes = RecipeManager::new(db.pool().clone());
    let recipe = recipes
        .create_recipe(alice.id, &draft("Pancakes", vec![entry(flour.id, 200)], vec![]))
        .await
        .unwrap();

    let cart = CartManager::new(db.pool().clone());
    cart.add(alice.id, recipe.id).await.unwrap();

    assert!(cart.contains(alice.id, recipe.id).await.unwrap());
    assert!(!cart.contains(bob.id, recipe.id).await.unwrap());
    assert!(cart.ingredient_rows(bob.id).await.unwrap().is_empty());
}
