// ABOUTME: Route module organization for Mealshare HTTP endpoints
// ABOUTME: Centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Route module for the Mealshare server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains route definitions and thin handler functions that delegate to
//! the store managers.

/// Health check and readiness routes
pub mod health;
/// Ingredient reference data routes
pub mod ingredients;
/// Recipe CRUD, favorite/cart toggles, and the shopping list download
pub mod recipes;
/// Subscription toggle and listing routes
pub mod subscriptions;
/// Tag reference data routes
pub mod tags;

pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use recipes::RecipeRoutes;
pub use subscriptions::SubscriptionRoutes;
pub use tags::TagRoutes;
