// ABOUTME: Recipe domain types: recipes, ingredients, tags, and join records
// ABOUTME: Includes the draft type consumed by recipe create/update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable ingredient reference data.
///
/// Names are unique; the measurement unit belongs to the ingredient, not to
/// any particular recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: Uuid,
    /// Unique ingredient name
    pub name: String,
    /// Unit the ingredient is measured in (g, ml, pcs, ...)
    pub measurement_unit: String,
}

/// Recipe tag reference data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: Uuid,
    /// Unique display name
    pub name: String,
    /// Unique hex color used by clients
    pub color: String,
    /// Unique URL slug
    pub slug: String,
}

/// One ingredient within a recipe, hydrated with reference data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient id
    pub id: Uuid,
    /// Ingredient name
    pub name: String,
    /// Ingredient measurement unit
    pub measurement_unit: String,
    /// Quantity of this ingredient in the recipe, >= 1
    pub amount: i64,
}

/// A fully hydrated recipe as returned by reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: Uuid,
    /// Dish name
    pub name: String,
    /// Preparation instructions
    pub text: String,
    /// Opaque image reference (data URL or media path; storage is external)
    pub image: String,
    /// Cooking time in minutes, >= 1
    pub cooking_time: i64,
    /// Recipe author
    pub author_id: Uuid,
    /// Publication timestamp; listings order by this, newest first
    pub pub_date: DateTime<Utc>,
    /// Ingredient set with amounts
    pub ingredients: Vec<RecipeIngredient>,
    /// Tag set
    pub tags: Vec<Tag>,
}

/// Compact recipe representation used in subscription and membership views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Unique identifier
    pub id: Uuid,
    /// Dish name
    pub name: String,
    /// Opaque image reference
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
}

/// One `(ingredient_id, amount)` entry in a recipe draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    /// Ingredient id
    pub id: Uuid,
    /// Quantity, must be >= 1
    pub amount: i64,
}

/// Input to recipe create and update.
///
/// The ingredient list is ordered; order is preserved in storage so the
/// shopping list report can report first-encounter order deterministically.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    /// Dish name
    pub name: String,
    /// Preparation instructions
    pub text: String,
    /// Opaque image reference
    pub image: String,
    /// Cooking time in minutes, >= 1
    pub cooking_time: i64,
    /// Ordered ingredient entries, non-empty, ids unique within the list
    pub ingredients: Vec<IngredientAmount>,
    /// Tag ids. Empty on update means "leave tags unchanged".
    pub tags: Vec<Uuid>,
}
