// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Shares the database, auth manager, and config across routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Routes receive
//! an `Arc<ServerResources>` as axum state instead of constructing their
//! own managers and pools.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Shared database handle
    pub database: Arc<Database>,
    /// Bearer token authenticator
    pub auth_manager: Arc<AuthManager>,
    /// Loaded server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(AuthManager::new(database.clone()));

        Self {
            database,
            auth_manager,
            config,
        }
    }
}
