// ABOUTME: Route handlers for the recipes REST API
// ABOUTME: CRUD, favorite and cart toggles, and the shopping list download
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Recipe routes
//!
//! Reads are open; anonymous viewers simply get `false` membership flags.
//! All mutating endpoints require a bearer token identifying the user.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::AuthResult,
    database::{
        recipes::RecipeListFilter, CartManager, FavoriteManager, RecipeManager,
        SubscriptionManager,
    },
    errors::AppError,
    models::{IngredientAmount, Recipe, RecipeDraft, RecipeSummary},
    pagination::{Page, PaginationParams},
    resources::ServerResources,
    shopping_list,
};

use super::tags::TagResponse;

/// Author block embedded in recipe responses
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorResponse {
    /// Unique identifier
    pub id: String,
    /// Handle
    pub username: String,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Whether the viewer follows this author
    pub is_subscribed: bool,
}

/// One ingredient line in a recipe response
#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientInRecipeResponse {
    /// Ingredient id
    pub id: String,
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Amount in this recipe
    pub amount: i64,
}

/// Response for a full recipe
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Unique identifier
    pub id: String,
    /// Dish name
    pub name: String,
    /// Preparation instructions
    pub text: String,
    /// Opaque image reference
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Recipe author
    pub author: AuthorResponse,
    /// Ingredient set with amounts
    pub ingredients: Vec<IngredientInRecipeResponse>,
    /// Tag set
    pub tags: Vec<TagResponse>,
    /// Whether the viewer favorited this recipe
    pub is_favorited: bool,
    /// Whether this recipe is in the viewer's cart
    pub is_in_shopping_cart: bool,
    /// Publication timestamp
    pub pub_date: String,
}

/// Compact recipe representation returned by toggle adds
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeSummaryResponse {
    /// Unique identifier
    pub id: String,
    /// Dish name
    pub name: String,
    /// Opaque image reference
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

/// One `(ingredient id, amount)` entry in a recipe request body
#[derive(Debug, Deserialize)]
pub struct IngredientAmountBody {
    /// Ingredient id
    pub id: Uuid,
    /// Amount, must be >= 1
    pub amount: i64,
}

/// Request body for creating or updating a recipe
#[derive(Debug, Deserialize)]
pub struct RecipeBody {
    /// Dish name
    pub name: String,
    /// Preparation instructions
    pub text: String,
    /// Opaque image reference
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Ordered ingredient entries
    pub ingredients: Vec<IngredientAmountBody>,
    /// Tag ids; empty on update leaves tags unchanged
    #[serde(default)]
    pub tags: Vec<Uuid>,
}

impl From<RecipeBody> for RecipeDraft {
    fn from(body: RecipeBody) -> Self {
        Self {
            name: body.name,
            text: body.text,
            image: body.image,
            cooking_time: body.cooking_time,
            ingredients: body
                .ingredients
                .into_iter()
                .map(|entry| IngredientAmount {
                    id: entry.id,
                    amount: entry.amount,
                })
                .collect(),
            tags: body.tags,
        }
    }
}

/// Query parameters for listing recipes
#[derive(Debug, Deserialize, Default)]
pub struct ListRecipesQuery {
    /// Filter by author id
    pub author: Option<Uuid>,
    /// Filter by tag slug, repeatable
    #[serde(default)]
    pub tags: Vec<String>,
    /// Only the viewer's favorites ("1" or "true")
    pub is_favorited: Option<String>,
    /// Only recipes in the viewer's cart ("1" or "true")
    pub is_in_shopping_cart: Option<String>,
    /// Page number
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::handle_list))
            .route("/api/recipes", post(Self::handle_create))
            .route(
                "/api/recipes/download_shopping_cart",
                get(Self::handle_download_cart),
            )
            .route("/api/recipes/:id", get(Self::handle_get))
            .route("/api/recipes/:id", patch(Self::handle_update))
            .route("/api/recipes/:id", delete(Self::handle_delete))
            .route("/api/recipes/:id/favorite", post(Self::handle_add_favorite))
            .route(
                "/api/recipes/:id/favorite",
                delete(Self::handle_remove_favorite),
            )
            .route("/api/recipes/:id/shopping_cart", post(Self::handle_add_cart))
            .route(
                "/api/recipes/:id/shopping_cart",
                delete(Self::handle_remove_cart),
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

    /// Authenticate if a header is present; anonymous viewers are allowed
    /// on read endpoints
    async fn authenticate_optional(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Option<AuthResult> {
        let auth_value = headers.get("authorization").and_then(|h| h.to_str().ok())?;
        resources
            .auth_manager
            .authenticate_request(Some(auth_value))
            .await
            .ok()
    }

    /// Handle GET /api/recipes - list recipes with filters and pagination
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let viewer = Self::authenticate_optional(&headers, &resources)
            .await
            .map(|auth| auth.user_id);

        // Membership filters only apply to authenticated viewers
        let mut filter = RecipeListFilter {
            author: query.author,
            tag_slugs: query.tags.clone(),
            ..RecipeListFilter::default()
        };
        if flag_is_set(query.is_favorited.as_deref()) {
            filter.favorited_by = viewer;
        }
        if flag_is_set(query.is_in_shopping_cart.as_deref()) {
            filter.in_cart_of = viewer;
        }

        let params = PaginationParams {
            page: query.page,
            limit: query.limit,
        };

        let manager = recipe_manager(&resources);
        let (recipes, total) = manager.list_recipes(&filter, &params).await?;

        let mut results = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            results.push(recipe_response(&resources, viewer, recipe).await?);
        }

        let mut extra: Vec<(&str, String)> = Vec::new();
        if let Some(author) = query.author {
            extra.push(("author", author.to_string()));
        }
        for slug in &query.tags {
            extra.push(("tags", slug.clone()));
        }
        if flag_is_set(query.is_favorited.as_deref()) {
            extra.push(("is_favorited", "1".to_owned()));
        }
        if flag_is_set(query.is_in_shopping_cart.as_deref()) {
            extra.push(("is_in_shopping_cart", "1".to_owned()));
        }

        let page = Page::new("/api/recipes", &extra, &params, total, results);
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle POST /api/recipes - create a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<RecipeBody>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let draft: RecipeDraft = body.into();
        let manager = recipe_manager(&resources);
        let recipe = manager.create_recipe(auth.user_id, &draft).await?;

        let response = recipe_response(&resources, Some(auth.user_id), recipe).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/recipes/:id - get one recipe
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let viewer = Self::authenticate_optional(&headers, &resources)
            .await
            .map(|auth| auth.user_id);

        let manager = recipe_manager(&resources);
        let recipe = manager
            .get_recipe(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        let response = recipe_response(&resources, viewer, recipe).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PATCH /api/recipes/:id - update a recipe (author only)
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
        Json(body): Json<RecipeBody>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let draft: RecipeDraft = body.into();
        let manager = recipe_manager(&resources);
        let recipe = manager.update_recipe(id, auth.user_id, &draft).await?;

        let response = recipe_response(&resources, Some(auth.user_id), recipe).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id - delete a recipe (author only)
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let manager = recipe_manager(&resources);
        manager.delete_recipe(id, auth.user_id).await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /api/recipes/:id/favorite - add to favorites
    async fn handle_add_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        ensure_recipe_exists(&resources, id).await?;

        let favorites = FavoriteManager::new(resources.database.pool().clone());
        let summary = favorites.add(auth.user_id, id).await?;

        let response: RecipeSummaryResponse = summary.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/favorite - remove from favorites
    async fn handle_remove_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        ensure_recipe_exists(&resources, id).await?;

        let favorites = FavoriteManager::new(resources.database.pool().clone());
        let removed = favorites.remove(auth.user_id, id).await?;
        if !removed {
            return Err(AppError::membership_not_found(
                "Recipe is not in favorites",
            ));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /api/recipes/:id/shopping_cart - add to the cart
    async fn handle_add_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        ensure_recipe_exists(&resources, id).await?;

        let cart = CartManager::new(resources.database.pool().clone());
        let summary = cart.add(auth.user_id, id).await?;

        let response: RecipeSummaryResponse = summary.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/shopping_cart - remove from the cart
    async fn handle_remove_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        ensure_recipe_exists(&resources, id).await?;

        let cart = CartManager::new(resources.database.pool().clone());
        let removed = cart.remove(auth.user_id, id).await?;
        if !removed {
            return Err(AppError::membership_not_found(
                "Recipe is not in the shopping cart",
            ));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle GET /api/recipes/download_shopping_cart - aggregated report
    async fn handle_download_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let cart = CartManager::new(resources.database.pool().clone());
        let rows = cart.ingredient_rows(auth.user_id).await?;
        let report = shopping_list::build_report(&rows)?;

        let disposition = format!(
            "attachment; filename=\"{}\"",
            shopping_list::REPORT_FILENAME
        );
        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            report,
        )
            .into_response())
    }
}

/// Build a recipe manager over the shared pool
fn recipe_manager(resources: &Arc<ServerResources>) -> RecipeManager {
    RecipeManager::new(resources.database.pool().clone())
}

/// Fail with 404 when the referenced recipe id does not exist
async fn ensure_recipe_exists(
    resources: &Arc<ServerResources>,
    recipe_id: Uuid,
) -> Result<(), AppError> {
    let exists = recipe_manager(resources).get_recipe(recipe_id).await?;
    if exists.is_none() {
        return Err(AppError::not_found(format!("Recipe {recipe_id}")));
    }
    Ok(())
}

/// Interpret a query flag the way browser clients send it
fn flag_is_set(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true" | "True"))
}

/// Hydrate a recipe into its response form with viewer-dependent flags
async fn recipe_response(
    resources: &Arc<ServerResources>,
    viewer: Option<Uuid>,
    recipe: Recipe,
) -> Result<RecipeResponse, AppError> {
    let author = resources
        .database
        .get_user(recipe.author_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", recipe.author_id)))?;

    let pool = resources.database.pool().clone();
    let (is_subscribed, is_favorited, is_in_shopping_cart) = match viewer {
        Some(viewer_id) => {
            let subscriptions = SubscriptionManager::new(pool.clone());
            let favorites = FavoriteManager::new(pool.clone());
            let cart = CartManager::new(pool);
            (
                subscriptions.is_subscribed(viewer_id, author.id).await?,
                favorites.contains(viewer_id, recipe.id).await?,
                cart.contains(viewer_id, recipe.id).await?,
            )
        }
        None => (false, false, false),
    };

    Ok(RecipeResponse {
        id: recipe.id.to_string(),
        name: recipe.name,
        text: recipe.text,
        image: recipe.image,
        cooking_time: recipe.cooking_time,
        author: AuthorResponse {
            id: author.id.to_string(),
            username: author.username,
            email: author.email,
            first_name: author.first_name,
            last_name: author.last_name,
            is_subscribed,
        },
        ingredients: recipe
            .ingredients
            .into_iter()
            .map(|ingredient| IngredientInRecipeResponse {
                id: ingredient.id.to_string(),
                name: ingredient.name,
                measurement_unit: ingredient.measurement_unit,
                amount: ingredient.amount,
            })
            .collect(),
        tags: recipe.tags.into_iter().map(Into::into).collect(),
        is_favorited,
        is_in_shopping_cart,
        pub_date: recipe.pub_date.to_rfc3339(),
    })
}
