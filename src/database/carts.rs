// ABOUTME: Shopping cart membership store and ingredient row expansion
// ABOUTME: Feeds the shopping list aggregation with ordered ingredient rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::RecipeSummary;
use crate::shopping_list::IngredientRow;

/// Shopping cart database operations manager
pub struct CartManager {
    pool: SqlitePool,
}

impl CartManager {
    /// Create a new cart manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a recipe to a user's cart
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the pair is already present so
    /// callers can surface "already in cart"; the unique constraint covers
    /// the insert race
    pub async fn add(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<RecipeSummary> {
        let result = sqlx::query(
            r"
            INSERT INTO cart_items (user_id, recipe_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => self.recipe_summary(recipe_id).await,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                AppError::already_exists("Recipe is already in the shopping cart")
                    .with_user_id(user_id)
                    .with_resource_id(recipe_id.to_string()),
            ),
            Err(e) => Err(AppError::database(format!("Failed to add cart item: {e}"))),
        }
    }

    /// Remove a recipe from a user's cart
    ///
    /// Returns `true` if a record was removed, `false` if none existed; the
    /// caller decides how to report the no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn remove(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM cart_items WHERE user_id = $1 AND recipe_id = $2",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to remove cart item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a recipe is in a user's cart
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn contains(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM cart_items WHERE user_id = $1 AND recipe_id = $2",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check cart item: {e}")))?;

        Ok(row.is_some())
    }

    /// Expand the user's cart into ingredient rows.
    ///
    /// Each cart entry contributes every `recipe_ingredients` row of its
    /// recipe. Rows come back ordered by cart insertion and then recipe
    /// composition order, so the aggregation's first-encounter grouping is
    /// deterministic. Read-only: no cart or recipe state changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn ingredient_rows(&self, user_id: Uuid) -> AppResult<Vec<IngredientRow>> {
        let rows = sqlx::query(
            r"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM cart_items c
            JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE c.user_id = $1
            ORDER BY c.rowid, ri.rowid
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to expand cart ingredients: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| IngredientRow {
                name: row.get("name"),
                measurement_unit: row.get("measurement_unit"),
                amount: row.get("amount"),
            })
            .collect())
    }

    /// Fetch the compact representation returned by toggle adds
    async fn recipe_summary(&self, recipe_id: Uuid) -> AppResult<RecipeSummary> {
        let row = sqlx::query(
            "SELECT id, name, image, cooking_time FROM recipes WHERE id = $1",
        )
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe summary: {e}")))?
        .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        let id: String = row.get("id");
        Ok(RecipeSummary {
            id: Uuid::parse_str(&id)
                .map_err(|e| AppError::database(format!("Invalid recipe id in database: {e}")))?,
            name: row.get("name"),
            image: row.get("image"),
            cooking_time: row.get("cooking_time"),
        })
    }
}
