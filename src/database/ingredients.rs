// ABOUTME: Ingredient reference data store
// ABOUTME: Create, lookup, and case-insensitive substring search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Ingredient;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the ingredients table
    pub(super) async fn migrate_ingredients(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                measurement_unit TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create ingredients table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name)")
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to create ingredients index: {e}")))?;

        Ok(())
    }

    /// Create an ingredient
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the name is taken
    pub async fn create_ingredient(&self, ingredient: &Ingredient) -> AppResult<Uuid> {
        let result = sqlx::query(
            r"
            INSERT INTO ingredients (id, name, measurement_unit)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(ingredient.id.to_string())
        .bind(&ingredient.name)
        .bind(&ingredient.measurement_unit)
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(ingredient.id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                AppError::already_exists(format!("Ingredient '{}' already exists", ingredient.name)),
            ),
            Err(e) => Err(AppError::database(format!(
                "Failed to create ingredient: {e}"
            ))),
        }
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_ingredient(&self, id: Uuid) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

        row.map(|r| row_to_ingredient(&r)).transpose()
    }

    /// List ingredients, optionally filtered by a case-insensitive
    /// substring of the name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_ingredients(&self, name_filter: Option<&str>) -> AppResult<Vec<Ingredient>> {
        let rows = match name_filter {
            Some(fragment) => {
                sqlx::query(
                    r"
                    SELECT id, name, measurement_unit
                    FROM ingredients
                    WHERE name LIKE $1 COLLATE NOCASE
                    ORDER BY name
                    ",
                )
                .bind(format!("%{fragment}%"))
                .fetch_all(self.pool())
                .await
            }
            None => {
                sqlx::query(
                    "SELECT id, name, measurement_unit FROM ingredients ORDER BY name",
                )
                .fetch_all(self.pool())
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }
}

/// Convert a database row into an [`Ingredient`]
pub(super) fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    let id: String = row.get("id");

    Ok(Ingredient {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid ingredient id in database: {e}")))?,
        name: row.get("name"),
        measurement_unit: row.get("measurement_unit"),
    })
}
