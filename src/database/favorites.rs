// ABOUTME: Favorite recipe membership store with toggle semantics
// ABOUTME: Mirrors the cart store over the favorites table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::RecipeSummary;

/// Favorites database operations manager
pub struct FavoriteManager {
    pool: SqlitePool,
}

impl FavoriteManager {
    /// Create a new favorites manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a recipe to a user's favorites
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the pair is already present
    pub async fn add(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<RecipeSummary> {
        let result = sqlx::query(
            r"
            INSERT INTO favorites (user_id, recipe_id, created_at)
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
                AppError::already_exists("Recipe is already in favorites")
                    .with_user_id(user_id)
                    .with_resource_id(recipe_id.to_string()),
            ),
            Err(e) => Err(AppError::database(format!("Failed to add favorite: {e}"))),
        }
    }

    /// Remove a recipe from a user's favorites
    ///
    /// Returns `true` if a record was removed, `false` if none existed
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn remove(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to remove favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a recipe is in a user's favorites
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn contains(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM favorites WHERE user_id = $1 AND recipe_id = $2",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check favorite: {e}")))?;

        Ok(row.is_some())
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
