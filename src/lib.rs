// ABOUTME: Main library entry point for the Mealshare recipe platform
// ABOUTME: Provides a REST API for recipes, favorites, carts, and subscriptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

#![deny(unsafe_code)]

//! # Mealshare
//!
//! A recipe-sharing backend. Users publish recipes built from a shared
//! ingredient catalog, tag them, favorite them, collect them into a
//! shopping cart, and follow other authors.
//!
//! ## Features
//!
//! - **Recipes**: CRUD over recipes with per-recipe ingredient amounts and tags
//! - **Reference data**: read-only ingredient and tag catalogs
//! - **Favorites and cart**: per-user recipe collections
//! - **Shopping list**: aggregated plain-text export of cart ingredients
//! - **Subscriptions**: follow authors and list their newest recipes
//!
//! ## Quick Start
//!
//! 1. Seed the ingredient catalog with the `seed-ingredients` binary
//! 2. Start the API with `mealshare-server`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealshare::config::environment::ServerConfig;
//! use mealshare::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Mealshare configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by binary crates (src/bin/) and integration tests
// (tests/). They must remain `pub` so external consumers can access them.

/// Bearer token authentication
pub mod auth;

/// Environment-based configuration management
pub mod config;

/// SQLite storage layer and per-domain managers
pub mod database;

/// Structured error types with HTTP status mapping
pub mod errors;

/// Structured logging initialization
pub mod logging;

/// Domain data structures
pub mod models;

/// Page envelopes and page/limit parameter handling
pub mod pagination;

/// Shared dependency container for routes
pub mod resources;

/// HTTP route handlers organized by domain
pub mod routes;

/// Router assembly and TCP serving
pub mod server;

/// Shopping list aggregation and rendering
pub mod shopping_list;
