// ABOUTME: Route handlers for ingredient reference data
// ABOUTME: Unpaginated listing with case-insensitive name search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Ingredient routes
//!
//! Read-only over HTTP; reference data is loaded with the
//! `seed-ingredients` binary.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::AppError, models::Ingredient, resources::ServerResources};

/// Response for a single ingredient
#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientResponse {
    /// Unique identifier
    pub id: String,
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id.to_string(),
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// Query parameters for listing ingredients
#[derive(Debug, Deserialize, Default)]
pub struct ListIngredientsQuery {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
}

/// Ingredient routes handler
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ingredients", get(Self::handle_list))
            .route("/api/ingredients/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/ingredients - list, optionally filtered by name
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListIngredientsQuery>,
    ) -> Result<Response, AppError> {
        let ingredients = resources
            .database
            .list_ingredients(query.name.as_deref())
            .await?;

        let response: Vec<IngredientResponse> =
            ingredients.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/ingredients/:id - get one ingredient
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let ingredient = resources
            .database
            .get_ingredient(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {id}")))?;

        let response: IngredientResponse = ingredient.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
