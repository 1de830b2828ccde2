// ABOUTME: Route handlers for tag reference data
// ABOUTME: Read-only listing and lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Tag routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::AppError, models::Tag, resources::ServerResources};

/// Response for a single tag
#[derive(Debug, Serialize, Deserialize)]
pub struct TagResponse {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Hex color
    pub color: String,
    /// URL slug
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.to_string(),
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

/// Tag routes handler
pub struct TagRoutes;

impl TagRoutes {
    /// Create all tag routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/tags", get(Self::handle_list))
            .route("/api/tags/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/tags - list all tags
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let tags = resources.database.list_tags().await?;

        let response: Vec<TagResponse> = tags.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/tags/:id - get one tag
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let tag = resources
            .database
            .get_tag(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id}")))?;

        let response: TagResponse = tag.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
