// ABOUTME: Tag reference data store
// ABOUTME: Create and lookup by id or slug; read-only over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Tag;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the tags table
    pub(super) async fn migrate_tags(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tags (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                color TEXT UNIQUE NOT NULL,
                slug TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create tags table: {e}")))?;

        Ok(())
    }

    /// Create a tag
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the name, color, or slug is taken
    pub async fn create_tag(&self, tag: &Tag) -> AppResult<Uuid> {
        let result = sqlx::query(
            r"
            INSERT INTO tags (id, name, color, slug)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(tag.id.to_string())
        .bind(&tag.name)
        .bind(&tag.color)
        .bind(&tag.slug)
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(tag.id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                AppError::already_exists(format!("Tag '{}' conflicts with an existing tag", tag.name)),
            ),
            Err(e) => Err(AppError::database(format!("Failed to create tag: {e}"))),
        }
    }

    /// Get a tag by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tag(&self, id: Uuid) -> AppResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, color, slug FROM tags WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get tag: {e}")))?;

        row.map(|r| row_to_tag(&r)).transpose()
    }

    /// Get a tag by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tag_by_slug(&self, slug: &str) -> AppResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, color, slug FROM tags WHERE slug = $1")
            .bind(slug)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get tag by slug: {e}")))?;

        row.map(|r| row_to_tag(&r)).transpose()
    }

    /// List all tags
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name, color, slug FROM tags ORDER BY name")
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list tags: {e}")))?;

        rows.iter().map(row_to_tag).collect()
    }
}

/// Convert a database row into a [`Tag`]
pub(super) fn row_to_tag(row: &SqliteRow) -> AppResult<Tag> {
    let id: String = row.get("id");

    Ok(Tag {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid tag id in database: {e}")))?,
        name: row.get("name"),
        color: row.get("color"),
        slug: row.get("slug"),
    })
}
