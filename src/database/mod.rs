// ABOUTME: Database management for the Mealshare server over SQLite
// ABOUTME: Owns the connection pool and runs idempotent schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! # Database Management
//!
//! This module provides database functionality for the Mealshare server.
//! The [`Database`] struct owns the `SQLite` pool and bootstraps the schema;
//! per-domain managers ([`RecipeManager`], [`CartManager`],
//! [`FavoriteManager`], [`SubscriptionManager`]) wrap the same pool and
//! expose the store operations used by the HTTP routes.

/// Shopping cart membership and ingredient aggregation queries
pub mod carts;
/// Favorite recipe membership store
pub mod favorites;
/// Ingredient reference data store
pub mod ingredients;
/// Recipe composition store (transactional create/update/delete)
pub mod recipes;
/// Subscription store with annotated listings
pub mod subscriptions;
/// Tag reference data store
pub mod tags;
/// API token lookup for bearer authentication
mod tokens;
/// User account store
mod users;

pub use carts::CartManager;
pub use favorites::FavoriteManager;
pub use recipes::RecipeManager;
pub use subscriptions::SubscriptionManager;

use crate::errors::{AppError, AppResult};
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for users, recipes, and membership sets
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and bootstrap the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist,
        // preserving any query parameters already on the URL
        let connection_options = if database_url.starts_with("sqlite:") && database_url != "sqlite::memory:" {
            let separator = if database_url.contains('?') { '&' } else { '?' };
            format!("{database_url}{separator}mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        // Join-row deletes must cascade even when a store forgets to be
        // explicit about them
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to enable foreign keys: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any migration statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_tokens().await?;
        self.migrate_ingredients().await?;
        self.migrate_tags().await?;
        self.migrate_recipes().await?;
        self.migrate_memberships().await?;
        self.migrate_subscriptions().await?;

        Ok(())
    }

    /// Create recipe and join tables
    async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                text TEXT NOT NULL,
                image TEXT NOT NULL,
                cooking_time INTEGER NOT NULL CHECK (cooking_time >= 1),
                author_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                pub_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipes table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                amount INTEGER NOT NULL CHECK (amount >= 1),
                UNIQUE(recipe_id, ingredient_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe_ingredients table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                tag_id TEXT NOT NULL REFERENCES tags(id),
                UNIQUE(recipe_id, tag_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe_tags table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create recipe index: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_pub_date ON recipes(pub_date)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create recipe index: {e}")))?;

        Ok(())
    }

    /// Create favorite and cart membership tables
    async fn migrate_memberships(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create favorites table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cart_items (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create cart_items table: {e}")))?;

        Ok(())
    }

    /// Create subscription table
    async fn migrate_subscriptions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscriptions (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                author_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, author_id),
                CHECK (user_id <> author_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create subscriptions table: {e}")))?;

        Ok(())
    }
}
