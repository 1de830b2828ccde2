// ABOUTME: API token storage for bearer authentication
// ABOUTME: Only SHA-256 digests of tokens are persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

use super::Database;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the api_tokens table
    pub(super) async fn migrate_tokens(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS api_tokens (
                token_hash TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create api_tokens table: {e}")))?;

        Ok(())
    }

    /// Store a token digest for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn insert_api_token(&self, user_id: Uuid, token_hash: &str) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO api_tokens (token_hash, user_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(token_hash)
        .bind(user_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to store api token: {e}")))?;

        Ok(())
    }

    /// Resolve a token digest to the owning user id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_id_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Uuid>> {
        let row = sqlx::query("SELECT user_id FROM api_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to look up api token: {e}")))?;

        row.map(|r| {
            let user_id: String = r.get("user_id");
            Uuid::parse_str(&user_id)
                .map_err(|e| AppError::database(format!("Invalid user id in api_tokens: {e}")))
        })
        .transpose()
    }
}
