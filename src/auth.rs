// ABOUTME: Bearer token authentication over hashed API tokens
// ABOUTME: Issues opaque tokens and resolves Authorization headers to users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Token-based authentication.
//!
//! Login and signup flows live outside this service; it only validates
//! opaque bearer tokens. Tokens are random 32-byte values handed out once;
//! the database stores their SHA-256 digest, never the token itself.

use std::sync::Arc;

use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::database::Database;
use crate::errors::{AppError, AppResult};

/// Successful authentication result
#[derive(Debug, Clone, Copy)]
pub struct AuthResult {
    /// The authenticated user
    pub user_id: Uuid,
}

/// Authentication manager backed by the api_tokens table
pub struct AuthManager {
    database: Arc<Database>,
}

impl AuthManager {
    /// Create a new auth manager
    #[must_use]
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Issue a new API token for a user and return it.
    ///
    /// The plaintext token is returned exactly once; only its digest is
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn issue_token(&self, user_id: Uuid) -> AppResult<String> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        self.database
            .insert_api_token(user_id, &hash_token(&token))
            .await?;

        Ok(token)
    }

    /// Resolve an `Authorization` header value to a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no header is present, `AuthInvalid` for
    /// a malformed header or an unknown token
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let header = auth_header.ok_or_else(AppError::auth_required)?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("Token "))
            .ok_or_else(|| AppError::auth_invalid("Malformed authorization header"))?;

        let user_id = self
            .database
            .get_user_id_by_token_hash(&hash_token(token))
            .await?
            .ok_or_else(|| AppError::auth_invalid("Unknown or revoked token"))?;

        Ok(AuthResult { user_id })
    }
}

/// SHA-256 digest of a token, hex-encoded
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_and_opaque() {
        let digest = hash_token("abc");
        assert_eq!(digest, hash_token("abc"));
        assert_ne!(digest, "abc");
        assert_eq!(digest.len(), 64);
    }
}
