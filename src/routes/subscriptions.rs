// ABOUTME: Route handlers for author subscriptions
// ABOUTME: Follow/unfollow toggles and the annotated subscription feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Subscription routes
//!
//! All endpoints require a bearer token; an anonymous viewer has no feed.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::AuthResult,
    database::{subscriptions::SubscriptionEntry, SubscriptionManager},
    errors::AppError,
    resources::ServerResources,
};

use super::recipes::RecipeSummaryResponse;

/// Response for one followed author with their recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    /// Author id
    pub id: String,
    /// Handle
    pub username: String,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Always `true` in a subscription listing
    pub is_subscribed: bool,
    /// Total number of recipes the author has published
    pub recipes_count: i64,
    /// Newest recipes first, capped by `recipes_limit`
    pub recipes: Vec<RecipeSummaryResponse>,
}

impl From<SubscriptionEntry> for SubscriptionResponse {
    fn from(entry: SubscriptionEntry) -> Self {
        Self {
            id: entry.author.id.to_string(),
            username: entry.author.username,
            email: entry.author.email,
            first_name: entry.author.first_name,
            last_name: entry.author.last_name,
            is_subscribed: true,
            recipes_count: entry.recipes_count,
            recipes: entry.recipes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Query parameters for the subscription feed
#[derive(Debug, Deserialize, Default)]
pub struct ListSubscriptionsQuery {
    /// Cap on the recipes embedded per author
    pub recipes_limit: Option<i64>,
}

/// Subscription routes handler
pub struct SubscriptionRoutes;

impl SubscriptionRoutes {
    /// Create all subscription routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/subscriptions",
                get(Self::handle_list),
            )
            .route(
                "/api/users/:id/subscribe",
                post(Self::handle_subscribe),
            )
            .route(
                "/api/users/:id/subscribe",
                delete(Self::handle_unsubscribe),
            )
            .with_state(resources)
    }

    /// Extract and authenticate the user from the authorization header
    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        let auth_value = headers.get("authorization").and_then(|h| h.to_str().ok());
        resources.auth_manager.authenticate_request(auth_value).await
    }

    /// Handle GET /api/users/subscriptions - list followed authors
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListSubscriptionsQuery>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let manager = SubscriptionManager::new(resources.database.pool().clone());
        let entries = manager
            .list_subscriptions(auth.user_id, query.recipes_limit)
            .await?;

        let response: Vec<SubscriptionResponse> =
            entries.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/users/:id/subscribe - follow an author
    async fn handle_subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let manager = SubscriptionManager::new(resources.database.pool().clone());
        manager.subscribe(auth.user_id, id).await?;

        let entries = manager
            .list_subscriptions(auth.user_id, None)
            .await?;
        let entry = entries
            .into_iter()
            .find(|entry| entry.author.id == id)
            .ok_or_else(|| AppError::internal("Subscription vanished after insert"))?;

        let response: SubscriptionResponse = entry.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/:id/subscribe - unfollow an author
    async fn handle_unsubscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let manager = SubscriptionManager::new(resources.database.pool().clone());
        let removed = manager.unsubscribe(auth.user_id, id).await?;
        if !removed {
            return Err(AppError::membership_not_found(
                "You are not subscribed to this user",
            ));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
