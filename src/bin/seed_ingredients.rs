// ABOUTME: Reference data seeder for the Mealshare database
// ABOUTME: Loads ingredient and tag catalogs from JSON fixture files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Reference data seeder.
//!
//! Populates the ingredient catalog (and optionally the tag catalog) from
//! JSON fixtures so recipes have something to be composed of.
//!
//! Usage:
//! ```bash
//! # Seed ingredients
//! cargo run --bin seed-ingredients -- --ingredients data/ingredients.json
//!
//! # Seed ingredients and tags
//! cargo run --bin seed-ingredients -- \
//!     --ingredients data/ingredients.json --tags data/tags.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use mealshare::{
    config::environment::ServerConfig,
    database::Database,
    models::{Ingredient, Tag},
};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "seed-ingredients",
    about = "Mealshare reference data seeder",
    long_about = "Populate the database with ingredient and tag catalogs from JSON fixtures"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Path to the ingredients fixture
    #[arg(long)]
    ingredients: PathBuf,

    /// Optional path to a tags fixture
    #[arg(long)]
    tags: Option<PathBuf>,
}

/// One ingredient fixture entry
#[derive(Debug, Deserialize)]
struct IngredientFixture {
    name: String,
    measurement_unit: String,
}

/// One tag fixture entry
#[derive(Debug, Deserialize)]
struct TagFixture {
    name: String,
    color: String,
    slug: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = SeedArgs::parse();

    let database_url = match args.database_url {
        Some(url) => url,
        None => ServerConfig::from_env()?.database.url,
    };

    let database = Database::new(&database_url).await?;
    info!("Database ready: {database_url}");

    let seeded = seed_ingredients(&database, &args.ingredients).await?;
    info!("Seeded {seeded} ingredients from {}", args.ingredients.display());

    if let Some(tags_path) = args.tags {
        let seeded = seed_tags(&database, &tags_path).await?;
        info!("Seeded {seeded} tags from {}", tags_path.display());
    }

    Ok(())
}

/// Load the ingredient fixture and insert every entry
async fn seed_ingredients(database: &Database, path: &PathBuf) -> Result<usize> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let fixtures: Vec<IngredientFixture> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid ingredient fixture {}", path.display()))?;

    let mut seeded = 0;
    for fixture in fixtures {
        let ingredient = Ingredient {
            id: Uuid::new_v4(),
            name: fixture.name,
            measurement_unit: fixture.measurement_unit,
        };
        match database.create_ingredient(&ingredient).await {
            Ok(_) => seeded += 1,
            Err(e) => warn!("Skipping ingredient '{}': {e}", ingredient.name),
        }
    }

    Ok(seeded)
}

/// Load the tag fixture and insert every entry
async fn seed_tags(database: &Database, path: &PathBuf) -> Result<usize> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let fixtures: Vec<TagFixture> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid tag fixture {}", path.display()))?;

    let mut seeded = 0;
    for fixture in fixtures {
        let tag = Tag {
            id: Uuid::new_v4(),
            name: fixture.name,
            color: fixture.color,
            slug: fixture.slug,
        };
        match database.create_tag(&tag).await {
            Ok(_) => seeded += 1,
            Err(e) => warn!("Skipping tag '{}': {e}", tag.slug),
        }
    }

    Ok(seeded)
}
