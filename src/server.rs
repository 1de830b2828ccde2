// ABOUTME: HTTP server assembly for the Mealshare API
// ABOUTME: Merges domain routers, applies middleware, and serves over TCP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Server assembly
//!
//! Builds one axum [`Router`] out of the per-domain route modules and runs
//! it on the configured port.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use http::{header::HeaderName, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::resources::ServerResources;
use crate::routes::{
    HealthRoutes, IngredientRoutes, RecipeRoutes, SubscriptionRoutes, TagRoutes,
};

/// Maximum accepted request body, generous enough for base64 images
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Mealshare HTTP server
pub struct MealshareServer {
    resources: Arc<ServerResources>,
}

impl MealshareServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes())
            .merge(IngredientRoutes::routes(self.resources.clone()))
            .merge(TagRoutes::routes(self.resources.clone()))
            .merge(RecipeRoutes::routes(self.resources.clone()))
            .merge(SubscriptionRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(setup_cors())
    }

    /// Bind the configured port and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails
    pub async fn run(&self) -> Result<()> {
        let port = self.resources.config.http_port;
        let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("Failed to bind port {port}"))?;

        info!("HTTP server listening on port {port}");

        axum::serve(listener, self.router())
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}

/// Configure CORS from the `CORS_ALLOWED_ORIGINS` environment variable
///
/// An empty value or `*` allows any origin; otherwise a comma-separated
/// origin list is enforced.
fn setup_cors() -> CorsLayer {
    let allowed = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    let allow_origin = if allowed.is_empty() || allowed == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}
