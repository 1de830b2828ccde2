// ABOUTME: Subscription store: follow authors and list annotated feeds
// ABOUTME: Enforces the self-subscription and unique-pair invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{RecipeSummary, User};

/// One followed author with their recipe count and a capped recipe slice
#[derive(Debug, Clone)]
pub struct SubscriptionEntry {
    /// The followed author
    pub author: User,
    /// Total number of recipes the author has published
    pub recipes_count: i64,
    /// Newest recipes first, capped by the caller-supplied limit
    pub recipes: Vec<RecipeSummary>,
}

/// Subscription database operations manager
pub struct SubscriptionManager {
    pool: SqlitePool,
}

impl SubscriptionManager {
    /// Create a new subscription manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Subscribe a user to an author's recipe feed
    ///
    /// # Errors
    ///
    /// Returns `SelfSubscription` when user and author are the same,
    /// `ResourceNotFound` for an unknown author, and
    /// `ResourceAlreadyExists` for a duplicate pair
    pub async fn subscribe(&self, user_id: Uuid, author_id: Uuid) -> AppResult<()> {
        if user_id == author_id {
            return Err(AppError::self_subscription().with_user_id(user_id));
        }

        let author_exists = sqlx::query("SELECT 1 FROM users WHERE id = $1")
            .bind(author_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check author: {e}")))?;
        if author_exists.is_none() {
            return Err(AppError::not_found(format!("User {author_id}")));
        }

        let result = sqlx::query(
            r"
            INSERT INTO subscriptions (user_id, author_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(author_id.to_string())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                AppError::already_exists("You are already subscribed to this user")
                    .with_user_id(user_id)
                    .with_resource_id(author_id.to_string()),
            ),
            Err(e) => Err(AppError::database(format!("Failed to subscribe: {e}"))),
        }
    }

    /// Unsubscribe a user from an author
    ///
    /// Returns `true` if a record was removed, `false` if none existed
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn unsubscribe(&self, user_id: Uuid, author_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM subscriptions WHERE user_id = $1 AND author_id = $2",
        )
        .bind(user_id.to_string())
        .bind(author_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to unsubscribe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user follows an author
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_subscribed(&self, user_id: Uuid, author_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM subscriptions WHERE user_id = $1 AND author_id = $2",
        )
        .bind(user_id.to_string())
        .bind(author_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check subscription: {e}")))?;

        Ok(row.is_some())
    }

    /// List every author a user follows, annotated with their recipe count
    /// and a recipe slice capped by `recipes_limit`
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails
    pub async fn list_subscriptions(
        &self,
        user_id: Uuid,
        recipes_limit: Option<i64>,
    ) -> AppResult<Vec<SubscriptionEntry>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.created_at
            FROM subscriptions s
            JOIN users u ON u.id = s.author_id
            WHERE s.user_id = $1
            ORDER BY s.rowid
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list subscriptions: {e}")))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let author = super::users::row_to_user(row)?;
            let recipes_count = self.author_recipe_count(author.id).await?;
            let recipes = self.author_recipes(author.id, recipes_limit).await?;
            entries.push(SubscriptionEntry {
                author,
                recipes_count,
                recipes,
            });
        }

        Ok(entries)
    }

    /// Count an author's published recipes
    async fn author_recipe_count(&self, author_id: Uuid) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM recipes WHERE author_id = $1")
            .bind(author_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        Ok(row.get("total"))
    }

    /// Fetch an author's newest recipes, optionally capped
    async fn author_recipes(
        &self,
        author_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<RecipeSummary>> {
        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.unwrap_or(-1);

        let rows = sqlx::query(
            r"
            SELECT id, name, image, cooking_time
            FROM recipes
            WHERE author_id = $1
            ORDER BY pub_date DESC
            LIMIT $2
            ",
        )
        .bind(author_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list author recipes: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                Ok(RecipeSummary {
                    id: Uuid::parse_str(&id).map_err(|e| {
                        AppError::database(format!("Invalid recipe id in database: {e}"))
                    })?,
                    name: row.get("name"),
                    image: row.get("image"),
                    cooking_time: row.get("cooking_time"),
                })
            })
            .collect()
    }
}
