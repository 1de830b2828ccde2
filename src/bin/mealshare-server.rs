// ABOUTME: Main server binary for the Mealshare recipe platform
// ABOUTME: Loads configuration, opens the database, and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! # Mealshare API Server Binary
//!
//! Starts the recipe-sharing REST API with bearer authentication and
//! `SQLite` storage.

use anyhow::Result;
use clap::Parser;
use mealshare::{
    config::environment::ServerConfig, database::Database, logging,
    resources::ServerResources, server::MealshareServer,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mealshare-server")]
#[command(about = "Mealshare - recipe sharing REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Mealshare API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    info!("Database initialized: {}", config.database.url);

    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
    let server = MealshareServer::new(resources);

    display_available_endpoints();

    if let Err(e) = server.run().await {
        error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints() {
    info!("=== Available API Endpoints ===");
    info!("Reference data:");
    info!("   List Ingredients:  GET    /api/ingredients?name=");
    info!("   Get Ingredient:    GET    /api/ingredients/{{id}}");
    info!("   List Tags:         GET    /api/tags");
    info!("   Get Tag:           GET    /api/tags/{{id}}");
    info!("Recipes:");
    info!("   List Recipes:      GET    /api/recipes");
    info!("   Create Recipe:     POST   /api/recipes");
    info!("   Get Recipe:        GET    /api/recipes/{{id}}");
    info!("   Update Recipe:     PATCH  /api/recipes/{{id}}");
    info!("   Delete Recipe:     DELETE /api/recipes/{{id}}");
    info!("Collections:");
    info!("   Favorite:          POST/DELETE /api/recipes/{{id}}/favorite");
    info!("   Shopping Cart:     POST/DELETE /api/recipes/{{id}}/shopping_cart");
    info!("   Shopping List:     GET    /api/recipes/download_shopping_cart");
    info!("Subscriptions:");
    info!("   Subscribe:         POST/DELETE /api/users/{{id}}/subscribe");
    info!("   List Follows:      GET    /api/users/subscriptions");
    info!("Monitoring:");
    info!("   Health Check:      GET    /health");
    info!("   Readiness:         GET    /ready");
    info!("=== End of Endpoint List ===");
}
