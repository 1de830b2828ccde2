// ABOUTME: Shared test fixtures for integration tests
// ABOUTME: Builds in-memory databases and seeds users, ingredients, and tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

#![allow(dead_code, clippy::unwrap_used)]

use mealshare::database::Database;
use mealshare::models::{Ingredient, IngredientAmount, RecipeDraft, Tag, User};
use uuid::Uuid;

/// Create a fresh in-memory database with the full schema
pub async fn create_test_database() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

/// Insert a user and return it
pub async fn seed_user(database: &Database, username: &str) -> User {
    let user = User::new(
        username,
        format!("{username}@example.com"),
        "Test",
        "User",
    );
    database.create_user(&user).await.unwrap();
    user
}

/// Insert an ingredient and return it
pub async fn seed_ingredient(database: &Database, name: &str, unit: &str) -> Ingredient {
    let ingredient = Ingredient {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    };
    database.create_ingredient(&ingredient).await.unwrap();
    ingredient
}

/// Insert a tag and return it.
///
/// The color column is unique, so it is derived from the slug to keep
/// fixtures collision-free.
pub async fn seed_tag(database: &Database, name: &str, slug: &str) -> Tag {
    let hash = slug
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    let tag = Tag {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        color: format!("#{:06X}", hash & 0x00FF_FFFF),
        slug: slug.to_owned(),
    };
    database.create_tag(&tag).await.unwrap();
    tag
}

/// Build a minimal valid draft over the given ingredient amounts
pub fn draft(
    name: &str,
    ingredients: Vec<IngredientAmount>,
    tags: Vec<Uuid>,
) -> RecipeDraft {
    RecipeDraft {
        name: name.to_owned(),
        text: format!("How to cook {name}"),
        image: "data:image/png;base64,aW1n".to_owned(),
        cooking_time: 30,
        ingredients,
        tags,
    }
}

/// Shorthand for one draft ingredient entry
pub const fn entry(id: Uuid, amount: i64) -> IngredientAmount {
    IngredientAmount { id, amount }
}
