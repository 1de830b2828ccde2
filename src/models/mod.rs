// ABOUTME: Domain model module organization for Mealshare entities
// ABOUTME: Re-exports user, recipe, and reference data types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Domain models shared between the database layer and HTTP routes.

/// Recipe, ingredient, and tag types
pub mod recipe;
/// User account type
pub mod user;

pub use recipe::{
    Ingredient, IngredientAmount, Recipe, RecipeDraft, RecipeIngredient, RecipeSummary, Tag,
};
pub use user::User;
