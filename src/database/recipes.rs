// ABOUTME: Recipe composition store: transactional create, update, delete
// ABOUTME: Maintains the recipe-ingredient and recipe-tag join sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Recipe store.
//!
//! Create and update write the recipe row and all of its join rows inside a
//! single transaction: a failure mid-way never leaves a recipe with a
//! partial ingredient set. Updates replace the entire ingredient set rather
//! than diffing it.

use std::collections::HashSet;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, RecipeDraft, RecipeIngredient, Tag};
use crate::pagination::PaginationParams;

/// Filter for listing recipes
#[derive(Debug, Default, Clone)]
pub struct RecipeListFilter {
    /// Only recipes by this author
    pub author: Option<Uuid>,
    /// Only recipes carrying at least one of these tag slugs
    pub tag_slugs: Vec<String>,
    /// Only recipes favorited by this user
    pub favorited_by: Option<Uuid>,
    /// Only recipes in this user's shopping cart
    pub in_cart_of: Option<Uuid>,
}

/// Recipe database operations manager
///
/// Wraps a `SqlitePool`, holding no other state; cheap to construct per
/// request from [`crate::database::Database::pool`].
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a recipe with its ingredient and tag sets
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty ingredient list, a duplicate
    /// ingredient id, or an out-of-range amount or cooking time;
    /// `ResourceNotFound` for unknown ingredient or tag ids; a database
    /// error otherwise. Nothing is persisted on failure.
    pub async fn create_recipe(&self, author_id: Uuid, draft: &RecipeDraft) -> AppResult<Recipe> {
        validate_draft(draft)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        check_ingredient_entries(&mut tx, &draft.ingredients).await?;
        check_tags_exist(&mut tx, &draft.tags).await?;

        let recipe_id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO recipes (id, name, text, image, cooking_time, author_id, pub_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(recipe_id.to_string())
        .bind(&draft.name)
        .bind(&draft.text)
        .bind(&draft.image)
        .bind(draft.cooking_time)
        .bind(author_id.to_string())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe: {e}")))?;

        upsert_ingredients(&mut tx, recipe_id, draft).await?;
        replace_tags(&mut tx, recipe_id, &draft.tags).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe create: {e}")))?;

        self.get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::internal("Recipe vanished after create"))
    }

    /// Update a recipe, replacing its entire ingredient set
    ///
    /// The old `recipe_ingredients` rows are deleted before the new set is
    /// inserted; the tag set is replaced only when the draft carries a
    /// non-empty tag list (an empty list means "no change requested").
    ///
    /// # Errors
    ///
    /// Returns the same validation errors as [`Self::create_recipe`],
    /// `ResourceNotFound` for an unknown recipe id, and `PermissionDenied`
    /// when the editor is not the author
    pub async fn update_recipe(
        &self,
        recipe_id: Uuid,
        editor_id: Uuid,
        draft: &RecipeDraft,
    ) -> AppResult<Recipe> {
        validate_draft(draft)?;

        let author_id = self.recipe_author(recipe_id).await?;
        if author_id != editor_id {
            return Err(AppError::permission_denied(
                "Only the author can edit a recipe",
            ));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        check_ingredient_entries(&mut tx, &draft.ingredients).await?;
        check_tags_exist(&mut tx, &draft.tags).await?;

        sqlx::query(
            r"
            UPDATE recipes
            SET name = $1, text = $2, image = $3, cooking_time = $4
            WHERE id = $5
            ",
        )
        .bind(&draft.name)
        .bind(&draft.text)
        .bind(&draft.image)
        .bind(draft.cooking_time)
        .bind(recipe_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        // Full replace of the prior set, not a diff
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear recipe ingredients: {e}")))?;

        upsert_ingredients(&mut tx, recipe_id, draft).await?;

        if !draft.tags.is_empty() {
            sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
                .bind(recipe_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to clear recipe tags: {e}")))?;
            replace_tags(&mut tx, recipe_id, &draft.tags).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe update: {e}")))?;

        self.get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::internal("Recipe vanished after update"))
    }

    /// Delete a recipe and everything that references it
    ///
    /// Join rows, favorites, and cart entries are removed in the same
    /// transaction so the cascade is visible in the store layer instead of
    /// depending on the storage engine's foreign-key behavior.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown recipe id and
    /// `PermissionDenied` when the editor is not the author
    pub async fn delete_recipe(&self, recipe_id: Uuid, editor_id: Uuid) -> AppResult<()> {
        let author_id = self.recipe_author(recipe_id).await?;
        if author_id != editor_id {
            return Err(AppError::permission_denied(
                "Only the author can delete a recipe",
            ));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let id = recipe_id.to_string();
        for table in [
            "recipe_ingredients",
            "recipe_tags",
            "favorites",
            "cart_items",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE recipe_id = $1"))
                .bind(&id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to delete from {table}: {e}"))
                })?;
        }

        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe delete: {e}")))
    }

    /// Get a recipe by id, hydrated with its ingredients and tags
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_recipe(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, name, text, image, cooking_time, author_id, pub_date
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut recipe = row_to_recipe(&row)?;
        recipe.ingredients = self.recipe_ingredients(recipe_id).await?;
        recipe.tags = self.recipe_tags(recipe_id).await?;

        Ok(Some(recipe))
    }

    /// List recipes matching a filter, newest publication first
    ///
    /// Returns one page of hydrated recipes plus the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails
    pub async fn list_recipes(
        &self,
        filter: &RecipeListFilter,
        page: &PaginationParams,
    ) -> AppResult<(Vec<Recipe>, i64)> {
        let mut conditions = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(author) = filter.author {
            conditions.push("r.author_id = ?".to_owned());
            binds.push(author.to_string());
        }
        if let Some(user) = filter.favorited_by {
            conditions.push(
                "EXISTS (SELECT 1 FROM favorites f WHERE f.recipe_id = r.id AND f.user_id = ?)"
                    .to_owned(),
            );
            binds.push(user.to_string());
        }
        if let Some(user) = filter.in_cart_of {
            conditions.push(
                "EXISTS (SELECT 1 FROM cart_items c WHERE c.recipe_id = r.id AND c.user_id = ?)"
                    .to_owned(),
            );
            binds.push(user.to_string());
        }
        if !filter.tag_slugs.is_empty() {
            let placeholders = vec!["?"; filter.tag_slugs.len()].join(", ");
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM recipe_tags rt \
                 JOIN tags t ON t.id = rt.tag_id \
                 WHERE rt.recipe_id = r.id AND t.slug IN ({placeholders}))"
            ));
            binds.extend(filter.tag_slugs.iter().cloned());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) AS total FROM recipes r {where_clause}");
        let mut count_query = sqlx::query(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total: i64 = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?
            .get("total");

        let list_sql = format!(
            "SELECT r.id FROM recipes r {where_clause} \
             ORDER BY r.pub_date DESC LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query(&list_sql);
        for bind in &binds {
            list_query = list_query.bind(bind);
        }
        let rows = list_query
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let id = Uuid::parse_str(&id)
                .map_err(|e| AppError::database(format!("Invalid recipe id in database: {e}")))?;
            if let Some(recipe) = self.get_recipe(id).await? {
                recipes.push(recipe);
            }
        }

        Ok((recipes, total))
    }

    /// Get the author of a recipe, failing with `ResourceNotFound` for an
    /// unknown id
    async fn recipe_author(&self, recipe_id: Uuid) -> AppResult<Uuid> {
        let row = sqlx::query("SELECT author_id FROM recipes WHERE id = $1")
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe author: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        let author_id: String = row.get("author_id");
        Uuid::parse_str(&author_id)
            .map_err(|e| AppError::database(format!("Invalid author id in database: {e}")))
    }

    /// Fetch a recipe's ingredient rows in composition order
    async fn recipe_ingredients(&self, recipe_id: Uuid) -> AppResult<Vec<RecipeIngredient>> {
        let rows = sqlx::query(
            r"
            SELECT i.id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.rowid
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe ingredients: {e}")))?;

        rows.iter().map(row_to_recipe_ingredient).collect()
    }

    /// Fetch a recipe's tags in attachment order
    async fn recipe_tags(&self, recipe_id: Uuid) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query(
            r"
            SELECT t.id, t.name, t.color, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = $1
            ORDER BY rt.rowid
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe tags: {e}")))?;

        rows.iter().map(super::tags::row_to_tag).collect()
    }
}

/// Pure draft validation: runs before any database work
fn validate_draft(draft: &RecipeDraft) -> AppResult<()> {
    if draft.ingredients.is_empty() {
        return Err(AppError::missing_required_field("ingredients"));
    }
    if draft.cooking_time < 1 {
        return Err(AppError::value_out_of_range(
            "Cooking time must be at least 1 minute",
        ));
    }
    for entry in &draft.ingredients {
        if entry.amount < 1 {
            return Err(AppError::value_out_of_range(
                "Ingredient amount must be at least 1",
            ));
        }
    }
    if draft.name.trim().is_empty() {
        return Err(AppError::missing_required_field("name"));
    }
    Ok(())
}

/// Verify every ingredient id exists and appears only once in the draft.
///
/// Duplicate detection reports the ingredient's name, which requires the
/// reference row, so this runs inside the transaction alongside the
/// existence checks.
async fn check_ingredient_entries(
    tx: &mut Transaction<'_, Sqlite>,
    entries: &[crate::models::IngredientAmount],
) -> AppResult<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        let row = sqlx::query("SELECT name FROM ingredients WHERE id = $1")
            .bind(entry.id.to_string())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to check ingredient: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {}", entry.id)))?;

        if !seen.insert(entry.id) {
            let name: String = row.get("name");
            return Err(AppError::invalid_input(format!(
                "{name} is already in the ingredient list"
            )));
        }
    }
    Ok(())
}

/// Verify every tag id exists
async fn check_tags_exist(tx: &mut Transaction<'_, Sqlite>, tags: &[Uuid]) -> AppResult<()> {
    for tag_id in tags {
        let exists = sqlx::query("SELECT 1 FROM tags WHERE id = $1")
            .bind(tag_id.to_string())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to check tag: {e}")))?;
        if exists.is_none() {
            return Err(AppError::not_found(format!("Tag {tag_id}")));
        }
    }
    Ok(())
}

/// Upsert one join row per draft entry.
///
/// Insert-or-overwrite keeps the unique `(recipe_id, ingredient_id)`
/// constraint as the race guard instead of failing a concurrent writer.
async fn upsert_ingredients(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: Uuid,
    draft: &RecipeDraft,
) -> AppResult<()> {
    for entry in &draft.ingredients {
        sqlx::query(
            r"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
            VALUES ($1, $2, $3)
            ON CONFLICT(recipe_id, ingredient_id) DO UPDATE SET amount = excluded.amount
            ",
        )
        .bind(recipe_id.to_string())
        .bind(entry.id.to_string())
        .bind(entry.amount)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe ingredient: {e}")))?;
    }
    Ok(())
}

/// Insert the tag association rows for a recipe
async fn replace_tags(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: Uuid,
    tags: &[Uuid],
) -> AppResult<()> {
    for tag_id in tags {
        sqlx::query(
            r"
            INSERT INTO recipe_tags (recipe_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT(recipe_id, tag_id) DO NOTHING
            ",
        )
        .bind(recipe_id.to_string())
        .bind(tag_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe tag: {e}")))?;
    }
    Ok(())
}

/// Convert a database row into a [`Recipe`] shell (joins hydrated separately)
fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let id: String = row.get("id");
    let author_id: String = row.get("author_id");
    let pub_date: String = row.get("pub_date");

    Ok(Recipe {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid recipe id in database: {e}")))?,
        name: row.get("name"),
        text: row.get("text"),
        image: row.get("image"),
        cooking_time: row.get("cooking_time"),
        author_id: Uuid::parse_str(&author_id)
            .map_err(|e| AppError::database(format!("Invalid author id in database: {e}")))?,
        pub_date: chrono::DateTime::parse_from_rfc3339(&pub_date)
            .map_err(|e| AppError::database(format!("Invalid recipe timestamp: {e}")))?
            .with_timezone(&chrono::Utc),
        ingredients: Vec::new(),
        tags: Vec::new(),
    })
}

/// Convert a join row into a [`RecipeIngredient`]
fn row_to_recipe_ingredient(row: &SqliteRow) -> AppResult<RecipeIngredient> {
    let id: String = row.get("id");

    Ok(RecipeIngredient {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid ingredient id in database: {e}")))?,
        name: row.get("name"),
        measurement_unit: row.get("measurement_unit"),
        amount: row.get("amount"),
    })
}
